use std::{cmp::max, num::TryFromIntError};

use anyhow::Context;
use teloxide_core::{
    RequestError,
    payloads::GetUpdatesSetters,
    prelude::*,
    types::{AllowedUpdate, Update, UpdateId},
};

mod commands;
mod config;
mod console;
mod dispatcher;
mod event;
mod menu;
mod outbound;
mod scream;
mod state;
mod utils;

use crate::{
    config::Config,
    dispatcher::{BotCtx, Outcome},
    event::InboundEvent,
    menu::Menus,
    utils::ResultExt,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    pretty_env_logger::init();
    if let Err(err) = dotenv {
        log::debug!("'.env' file not loaded: {err}");
    }
    let config = Config::from_env().context("failed to load configuration")?;

    let bot = Bot::new(config.token.clone());
    let ctx: &'static BotCtx = Box::leak(Box::new(BotCtx::new(Menus::new(
        config.tutorial_url.clone(),
    ))));

    if let Some(idle_timeout) = config.idle_timeout {
        tokio::spawn(state::evict_idle_users(&ctx.modes, idle_timeout));
    }

    let enter = console::spawn_enter_listener(std::io::BufReader::new(std::io::stdin()))
        .context("failed to start console listener")?;

    println!("Program is now running!");
    log::info!("Bot started");
    println!("Please press ENTER to exit.");

    tokio::select! {
        () = poll_updates(bot, ctx, config.poll_timeout_secs) => {}
        () = console::wait_for_enter(enter) => log::info!("exit requested from console"),
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for ctrl-c")?;
            log::info!("exit requested by ctrl-c");
        }
    }

    log::info!("Bot stopped");
    Ok(())
}

async fn poll_updates(bot: Bot, ctx: &'static BotCtx, timeout_secs: u32) {
    let mut offset: i32 = 0;
    loop {
        let updates = bot
            .get_updates()
            .offset(offset)
            .timeout(timeout_secs)
            .allowed_updates([AllowedUpdate::Message, AllowedUpdate::CallbackQuery])
            .send()
            .await;
        let updates = match updates {
            Ok(x) => x,
            Err(err) => match err {
                RequestError::Network(error) if error.is_timeout() => {
                    log::trace!("Telegram connection timed out.");
                    continue;
                }
                other_error => {
                    log::error!(
                        "Error while connection to telegram to receive updates: {other_error}."
                    );
                    continue;
                }
            },
        };
        for update in updates {
            match next_offset(offset, &update.id) {
                Ok(next) => offset = next,
                Err(err) => log::error!(
                    "update id {} doesn't fit into the polling offset: {err}",
                    update.id.0
                ),
            }

            let bot = bot.clone();
            tokio::spawn(update_handler(bot, update, ctx));
        }
    }
}

/// Offset that confirms every update up to and including `update_id`.
fn next_offset(offset: i32, update_id: &UpdateId) -> Result<i32, TryFromIntError> {
    let id = i32::try_from(update_id.0)?;
    Ok(max(offset, id.saturating_add(1)))
}

async fn update_handler(bot: Bot, update: Update, ctx: &BotCtx) {
    let Some(event) = InboundEvent::from_update(&update) else {
        log::debug!("ignoring update {} of unsupported kind", update.id.0);
        return;
    };
    let outcome = ctx.dispatch(&event);
    if let Outcome::Ignored(reason) = &outcome {
        log::debug!("update {} ignored: {reason}", update.id.0);
    }
    outbound::execute(&bot, outcome.actions())
        .await
        .with_context(|| format!("failed to handle update {}", update.id.0))
        .log_err();
}
