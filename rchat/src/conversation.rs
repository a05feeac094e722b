//! Append-only message log for a single exchange.

use rprovider::{Message, Role};

use crate::ExchangeError;

/// Ordered messages of one exchange. Messages are only ever appended; the
/// log starts with a requester message and a tool message may only follow a
/// model message that asked for a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(messages: Vec<Message>) -> Result<Self, ExchangeError> {
        match messages.first() {
            Some(first) if first.role == Role::Requester => {}
            Some(first) => {
                return Err(ExchangeError::invalid_request(format!(
                    "conversation must start with a requester message, found {}",
                    first.role
                )));
            }
            None => {
                return Err(ExchangeError::invalid_request(
                    "conversation must contain at least one message",
                ));
            }
        }

        let mut conversation = Self {
            messages: Vec::with_capacity(messages.len() + 3),
        };
        for message in messages {
            conversation.push(message)?;
        }
        Ok(conversation)
    }

    pub fn push(&mut self, message: Message) -> Result<(), ExchangeError> {
        if message.role == Role::Tool
            && !self
                .messages
                .last()
                .is_some_and(|last| last.role == Role::Model && last.has_tool_calls())
        {
            return Err(ExchangeError::invalid_request(
                "tool message must follow a model message that requested a tool",
            ));
        }

        if let Some(last) = self.messages.last()
            && last.role == Role::Tool
            && message.role != Role::Model
        {
            return Err(ExchangeError::invalid_request(
                "only a model message may follow a tool message",
            ));
        }

        self.messages.push(message);
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn tool_rounds(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.role == Role::Tool)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use rprovider::{JsonObject, Part, ToolCall, ToolResult};

    use super::*;
    use crate::ExchangeErrorKind;

    fn tool_call_message() -> Message {
        Message::new(
            Role::Model,
            vec![Part::ToolCall(ToolCall::new("get_file_content", JsonObject::new()))],
        )
    }

    fn tool_message() -> Message {
        Message::tool(ToolResult::new("get_file_content", JsonObject::new()))
    }

    #[test]
    fn rejects_empty_or_model_first_logs() {
        let empty = Conversation::new(Vec::new()).expect_err("empty should fail");
        assert_eq!(empty.kind, ExchangeErrorKind::InvalidRequest);

        let model_first =
            Conversation::new(vec![Message::model("hi")]).expect_err("model first should fail");
        assert!(model_first.message.contains("requester"));
    }

    #[test]
    fn tool_message_requires_preceding_tool_call() {
        let mut conversation =
            Conversation::new(vec![Message::requester("hi"), Message::model("plain")])
                .expect("valid start");

        assert!(conversation.push(tool_message()).is_err());
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn tool_round_appends_in_order() {
        let mut conversation =
            Conversation::new(vec![Message::requester("hi")]).expect("valid start");
        conversation.push(tool_call_message()).expect("model push");
        conversation.push(tool_message()).expect("tool push");

        assert!(conversation.push(Message::requester("again")).is_err());
        conversation.push(Message::model("done")).expect("final push");

        assert_eq!(conversation.tool_rounds(), 1);
        assert_eq!(conversation.last(), Some(&Message::model("done")));
    }
}
