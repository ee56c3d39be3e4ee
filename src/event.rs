use teloxide_core::types::{
    CallbackQuery, CallbackQueryId, ChatId, Message, MessageEntity, MessageId, Update, UpdateKind,
    UserId,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Sender {
    pub id: UserId,
    pub first_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageEvent {
    pub sender: Option<Sender>,
    pub text: Option<String>,
    pub entities: Vec<MessageEntity>,
    pub message_id: MessageId,
    pub chat_id: ChatId,
}

/// Where the message carrying the pressed button lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MessageLocation {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallbackEvent {
    pub query_id: CallbackQueryId,
    pub sender: UserId,
    pub data: Option<String>,
    pub origin: Option<MessageLocation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Message(MessageEvent),
    CallbackQuery(CallbackEvent),
}

impl From<&Message> for MessageEvent {
    fn from(message: &Message) -> Self {
        Self {
            sender: message.from.as_ref().map(|user| Sender {
                id: user.id,
                first_name: user.first_name.clone(),
            }),
            text: message.text().map(str::to_owned),
            entities: message.entities().map(<[_]>::to_vec).unwrap_or_default(),
            message_id: message.id,
            chat_id: message.chat.id,
        }
    }
}

impl From<&CallbackQuery> for CallbackEvent {
    fn from(query: &CallbackQuery) -> Self {
        Self {
            query_id: query.id.clone(),
            sender: query.from.id,
            data: query.data.clone(),
            origin: query.message.as_ref().map(|message| MessageLocation {
                chat_id: message.chat().id,
                message_id: message.id(),
            }),
        }
    }
}

impl InboundEvent {
    /// `None` for update kinds the bot doesn't react to.
    pub fn from_update(update: &Update) -> Option<Self> {
        match &update.kind {
            UpdateKind::Message(message) => Some(InboundEvent::Message(message.into())),
            UpdateKind::CallbackQuery(query) => Some(InboundEvent::CallbackQuery(query.into())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use teloxide_core::types::MessageEntityKind;

    use super::*;

    const MESSAGE: &str = r#"{
        "message_id": 5,
        "date": 1700000000,
        "chat": { "id": 7, "type": "private", "first_name": "Ann" },
        "from": { "id": 7, "is_bot": false, "first_name": "Ann" },
        "text": "hi there",
        "entities": [{ "type": "bold", "offset": 0, "length": 2 }]
    }"#;

    fn update(json: &str) -> Update {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn message_update() {
        let event = InboundEvent::from_update(&update(&format!(
            r#"{{ "update_id": 10, "message": {MESSAGE} }}"#
        )));
        assert_eq!(
            event,
            Some(InboundEvent::Message(MessageEvent {
                sender: Some(Sender {
                    id: UserId(7),
                    first_name: "Ann".into(),
                }),
                text: Some("hi there".into()),
                entities: vec![MessageEntity {
                    kind: MessageEntityKind::Bold,
                    offset: 0,
                    length: 2,
                }],
                message_id: MessageId(5),
                chat_id: ChatId(7),
            }))
        );
    }

    #[test]
    fn callback_query_update() {
        let event = InboundEvent::from_update(&update(&format!(
            r#"{{
                "update_id": 11,
                "callback_query": {{
                    "id": "4382",
                    "from": {{ "id": 7, "is_bot": false, "first_name": "Ann" }},
                    "message": {MESSAGE},
                    "chat_instance": "-1",
                    "data": "Next"
                }}
            }}"#
        )));
        assert_eq!(
            event,
            Some(InboundEvent::CallbackQuery(CallbackEvent {
                query_id: CallbackQueryId("4382".into()),
                sender: UserId(7),
                data: Some("Next".into()),
                origin: Some(MessageLocation {
                    chat_id: ChatId(7),
                    message_id: MessageId(5),
                }),
            }))
        );
    }

    #[test]
    fn other_updates_are_skipped() {
        let event = InboundEvent::from_update(&update(&format!(
            r#"{{ "update_id": 12, "edited_message": {MESSAGE} }}"#
        )));
        assert_eq!(event, None);
    }
}
