use std::{io::BufRead, thread};

use tokio::sync::oneshot;

/// Reads one line from `reader` on a plain OS thread.
///
/// The thread is detached: a pending read never holds up runtime shutdown.
/// The receiver gets `()` once a line is read; it errors if the reader hits
/// EOF or fails.
pub fn spawn_enter_listener<R>(mut reader: R) -> std::io::Result<oneshot::Receiver<()>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    thread::Builder::new()
        .name("console".into())
        .spawn(move || {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(n) if n > 0 => {
                    let _ = tx.send(());
                }
                Ok(_) => log::debug!("stdin closed, waiting for ctrl-c"),
                Err(err) => log::warn!("failed to read stdin: {err}, waiting for ctrl-c"),
            }
        })?;
    Ok(rx)
}

/// Resolves when ENTER is pressed. If stdin is closed this never resolves, so the
/// bot keeps running until ctrl-c.
pub async fn wait_for_enter(enter: oneshot::Receiver<()>) {
    if enter.await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod test {
    use std::{
        io::{BufReader, Cursor, Read},
        time::{Duration, Instant},
    };

    use super::*;

    /// Blocks like a terminal nobody types into.
    struct SilentTerminal(Duration);

    impl Read for SilentTerminal {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            thread::sleep(self.0);
            Ok(0)
        }
    }

    #[tokio::test]
    async fn enter_resolves() {
        let enter = spawn_enter_listener(Cursor::new("\n")).unwrap();
        tokio::time::timeout(Duration::from_secs(5), wait_for_enter(enter))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn closed_stdin_never_resolves() {
        let enter = spawn_enter_listener(Cursor::new("")).unwrap();
        assert!(
            tokio::time::timeout(Duration::from_millis(200), wait_for_enter(enter))
                .await
                .is_err()
        );
    }

    #[test]
    fn shutdown_does_not_wait_for_pending_read() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        let started = Instant::now();
        runtime.block_on(async {
            let enter =
                spawn_enter_listener(BufReader::new(SilentTerminal(Duration::from_secs(10))))
                    .unwrap();
            tokio::select! {
                () = wait_for_enter(enter) => panic!("nothing was typed"),
                () = tokio::time::sleep(Duration::from_millis(100)) => {}
            }
        });
        drop(runtime);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
