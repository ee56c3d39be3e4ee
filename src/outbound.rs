use anyhow::Context;
use teloxide_core::{
    payloads::{EditMessageTextSetters, SendMessageSetters},
    prelude::*,
    types::{
        CallbackQueryId, ChatId, InlineKeyboardMarkup, MessageEntity, MessageId, ParseMode,
        Recipient,
    },
};

use crate::dispatcher::Action;

/// Sends actions in order, stopping at the first failed request.
pub async fn execute(bot: &Bot, actions: &[Action]) -> anyhow::Result<()> {
    for action in actions {
        perform(bot, action).await?;
    }
    Ok(())
}

async fn perform(bot: &Bot, action: &Action) -> anyhow::Result<()> {
    match action {
        Action::AnswerCallback { query_id } => {
            answer_callback(bot, query_id)
                .await
                .context("failed to answer callback query")?;
        }
        Action::EditMessageText {
            chat_id,
            message_id,
            text,
            parse_mode,
            keyboard,
        } => {
            edit_message(bot, *chat_id, *message_id, text, *parse_mode, keyboard)
                .await
                .with_context(|| format!("failed to edit message {message_id} in chat {chat_id}"))?;
        }
        Action::SendMessage {
            to,
            text,
            parse_mode,
            keyboard,
            entities,
        } => {
            send_message(
                bot,
                to,
                text,
                *parse_mode,
                keyboard.as_ref(),
                entities.as_deref(),
            )
            .await
            .context("failed to send message")?;
        }
        Action::CopyMessage {
            to,
            from_chat_id,
            message_id,
        } => {
            copy_message(bot, to, *from_chat_id, *message_id)
                .await
                .with_context(|| {
                    format!("failed to copy message {message_id} from chat {from_chat_id}")
                })?;
        }
    }
    Ok(())
}

fn answer_callback(
    bot: &Bot,
    query_id: &CallbackQueryId,
) -> <Bot as Requester>::AnswerCallbackQuery {
    bot.answer_callback_query(query_id.clone())
}

fn edit_message(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    text: &str,
    parse_mode: ParseMode,
    keyboard: &InlineKeyboardMarkup,
) -> <Bot as Requester>::EditMessageText {
    bot.edit_message_text(chat_id, message_id, text)
        .parse_mode(parse_mode)
        .reply_markup(keyboard.clone())
}

fn send_message(
    bot: &Bot,
    to: &Recipient,
    text: &str,
    parse_mode: Option<ParseMode>,
    keyboard: Option<&InlineKeyboardMarkup>,
    entities: Option<&[MessageEntity]>,
) -> <Bot as Requester>::SendMessage {
    let mut request = bot.send_message(to.clone(), text);
    if let Some(parse_mode) = parse_mode {
        request = request.parse_mode(parse_mode);
    }
    if let Some(keyboard) = keyboard {
        request = request.reply_markup(keyboard.clone());
    }
    if let Some(entities) = entities {
        request = request.entities(entities.to_vec());
    }
    request
}

fn copy_message(
    bot: &Bot,
    to: &Recipient,
    from_chat_id: ChatId,
    message_id: MessageId,
) -> <Bot as Requester>::CopyMessage {
    bot.copy_message(to.clone(), from_chat_id, message_id)
}

#[cfg(test)]
mod test {
    use teloxide_core::{
        requests::HasPayload,
        types::{InlineKeyboardButton, MessageEntityKind, ReplyMarkup, UserId},
    };

    use super::*;

    fn bot() -> Bot {
        Bot::new("123:test")
    }

    fn keyboard() -> InlineKeyboardMarkup {
        InlineKeyboardMarkup::new([[InlineKeyboardButton::callback("Next", "Next")]])
    }

    #[test]
    fn answer_carries_query_id() {
        let request = answer_callback(&bot(), &CallbackQueryId("q1".into()));
        assert_eq!(
            request.payload_ref().callback_query_id,
            CallbackQueryId("q1".into())
        );
    }

    #[test]
    fn edit_uses_html_and_keyboard() {
        let request = edit_message(
            &bot(),
            ChatId(5),
            MessageId(7),
            "<b>Menu 2</b>",
            ParseMode::Html,
            &keyboard(),
        );
        let payload = request.payload_ref();
        assert_eq!(payload.chat_id, Recipient::Id(ChatId(5)));
        assert_eq!(payload.message_id, MessageId(7));
        assert_eq!(payload.text, "<b>Menu 2</b>");
        assert_eq!(payload.parse_mode, Some(ParseMode::Html));
        assert_eq!(payload.reply_markup, Some(keyboard()));
    }

    #[test]
    fn send_menu_message() {
        let to = Recipient::from(UserId(3));
        let request = send_message(
            &bot(),
            &to,
            "<b>Menu 1</b>",
            Some(ParseMode::Html),
            Some(&keyboard()),
            None,
        );
        let payload = request.payload_ref();
        assert_eq!(payload.chat_id, to);
        assert_eq!(payload.text, "<b>Menu 1</b>");
        assert_eq!(payload.parse_mode, Some(ParseMode::Html));
        assert_eq!(
            payload.reply_markup,
            Some(ReplyMarkup::InlineKeyboard(keyboard()))
        );
        assert_eq!(payload.entities, None);
    }

    #[test]
    fn send_screamed_message() {
        let to = Recipient::from(UserId(3));
        let entities = [MessageEntity {
            kind: MessageEntityKind::Bold,
            offset: 0,
            length: 5,
        }];
        let request = send_message(&bot(), &to, "HELLO", None, None, Some(&entities));
        let payload = request.payload_ref();
        assert_eq!(payload.text, "HELLO");
        assert_eq!(payload.parse_mode, None);
        assert_eq!(payload.reply_markup, None);
        assert_eq!(payload.entities, Some(entities.to_vec()));

        let request = send_message(&bot(), &to, "HELLO", None, None, None);
        assert_eq!(request.payload_ref().entities, None);
    }

    #[test]
    fn copy_goes_from_chat_to_sender() {
        let to = Recipient::from(UserId(3));
        let request = copy_message(&bot(), &to, ChatId(-100), MessageId(42));
        let payload = request.payload_ref();
        assert_eq!(payload.chat_id, to);
        assert_eq!(payload.from_chat_id, Recipient::Id(ChatId(-100)));
        assert_eq!(payload.message_id, MessageId(42));
    }
}
