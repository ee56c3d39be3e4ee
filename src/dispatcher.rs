use teloxide_core::types::{
    CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageEntity, MessageId,
    ParseMode, Recipient,
};

use crate::{
    commands::Command,
    event::{CallbackEvent, InboundEvent, MessageEvent, Sender},
    menu::{MenuScreen, Menus},
    scream::scream,
    state::ScreamModes,
};

pub const COMMAND_PREFIX: char = '/';

/// One outbound call to the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AnswerCallback {
        query_id: CallbackQueryId,
    },
    EditMessageText {
        chat_id: ChatId,
        message_id: MessageId,
        text: String,
        parse_mode: ParseMode,
        keyboard: InlineKeyboardMarkup,
    },
    SendMessage {
        to: Recipient,
        text: String,
        parse_mode: Option<ParseMode>,
        keyboard: Option<InlineKeyboardMarkup>,
        entities: Option<Vec<MessageEntity>>,
    },
    CopyMessage {
        to: Recipient,
        from_chat_id: ChatId,
        message_id: MessageId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IgnoreReason {
    #[error("message has no sender")]
    MissingSender,
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Calls to make, in order. May be empty (e.g. `/scream` only changes state).
    Handled(Vec<Action>),
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn actions(&self) -> &[Action] {
        match self {
            Outcome::Handled(actions) => actions,
            Outcome::Ignored(_) => &[],
        }
    }
}

pub struct BotCtx {
    pub menus: Menus,
    pub modes: ScreamModes,
}

impl BotCtx {
    pub fn new(menus: Menus) -> Self {
        Self {
            menus,
            modes: ScreamModes::new(),
        }
    }

    pub fn dispatch(&self, event: &InboundEvent) -> Outcome {
        match event {
            InboundEvent::Message(message) => self.handle_message(message),
            InboundEvent::CallbackQuery(query) => self.handle_button(query),
        }
    }

    fn handle_button(&self, query: &CallbackEvent) -> Outcome {
        let mut actions = vec![Action::AnswerCallback {
            query_id: query.query_id.clone(),
        }];

        let Some(origin) = query.origin else {
            log::debug!(
                "callback query {:?} from user {} has no message to edit",
                query.query_id,
                query.sender
            );
            return Outcome::Handled(actions);
        };

        let (text, keyboard) = match query
            .data
            .as_deref()
            .and_then(|token| self.menus.navigate(token))
        {
            Some(screen) => (screen.text.to_owned(), screen.keyboard()),
            None => {
                log::debug!(
                    "unknown callback token {:?} from user {}",
                    query.data,
                    query.sender
                );
                (
                    String::new(),
                    InlineKeyboardMarkup::new(Vec::<Vec<InlineKeyboardButton>>::new()),
                )
            }
        };

        actions.push(Action::EditMessageText {
            chat_id: origin.chat_id,
            message_id: origin.message_id,
            text,
            parse_mode: ParseMode::Html,
            keyboard,
        });
        Outcome::Handled(actions)
    }

    fn handle_message(&self, message: &MessageEvent) -> Outcome {
        let Some(sender) = &message.sender else {
            log::debug!("message {} has no sender, ignoring", message.message_id);
            return Outcome::Ignored(IgnoreReason::MissingSender);
        };
        let text = message.text.as_deref().unwrap_or_default();

        log::info!("user {}({}) sent: {text}", sender.first_name, sender.id);

        if text.starts_with(COMMAND_PREFIX) {
            self.handle_command(sender, text)
        } else if !text.is_empty() && self.modes.is_screaming(sender.id) {
            let (text, entities) = scream(text, &message.entities);
            Outcome::Handled(vec![Action::SendMessage {
                to: sender.id.into(),
                text,
                parse_mode: None,
                keyboard: None,
                entities: (!entities.is_empty()).then_some(entities),
            }])
        } else {
            Outcome::Handled(vec![Action::CopyMessage {
                to: sender.id.into(),
                from_chat_id: message.chat_id,
                message_id: message.message_id,
            }])
        }
    }

    fn handle_command(&self, sender: &Sender, text: &str) -> Outcome {
        let Some(command) = Command::parse(text) else {
            log::debug!("user {} sent unknown command {text:?}", sender.id);
            return Outcome::Ignored(IgnoreReason::UnknownCommand(text.to_owned()));
        };
        log::info!("user {}({}) sends {command:?} command", sender.first_name, sender.id);

        match command {
            Command::Scream => {
                self.modes.set_screaming(sender.id, true);
                Outcome::Handled(Vec::new())
            }
            Command::Whisper => {
                self.modes.set_screaming(sender.id, false);
                Outcome::Handled(Vec::new())
            }
            Command::Menu => Outcome::Handled(vec![send_menu(sender, &self.menus.first)]),
        }
    }
}

fn send_menu(sender: &Sender, screen: &MenuScreen) -> Action {
    Action::SendMessage {
        to: sender.id.into(),
        text: screen.text.to_owned(),
        parse_mode: Some(ParseMode::Html),
        keyboard: Some(screen.keyboard()),
        entities: None,
    }
}
