use crate::{
    gateway::{
        ChatCompletionMessage, ChatCompletionRequest, ChatMessage, GatewayConfig, Modality,
        ModelGateway, PROVIDER,
    },
    DiagramOutput, GenerationError, GenerationOutput, GenerationResult, IdentityResolver,
    ImageOutput, Message,
};
use std::sync::Arc;

/// Diagram type used when the caller does not request one.
pub const DEFAULT_DIAGRAM_TYPE: &str = "flowchart";
/// The one diagram type that selects the image path.
pub const PICTURE_TYPE: &str = "picture";

const IMAGE_INSTRUCTION: &str = "You are an expert at creating stunning visual images based on \
    descriptions. Generate high-quality, detailed images that match the user's request. For \
    modifications, analyze the previous image and the requested changes.";

fn diagram_instruction(diagram_type: &str) -> String {
    format!(
        "You are an expert at creating diagrams using Mermaid syntax. Generate clear, \
         well-structured {diagram_type} diagrams based on the user's description. For \
         modifications, adjust the existing diagram according to the user's request. Always \
         return valid Mermaid syntax."
    )
}

/// Turns a conversation plus a requested diagram type into either a
/// structured diagram or a generated image.
///
/// Two terminal paths, selected by the diagram type: `"picture"` requests
/// image and text modalities from the image model; every other value
/// requests diagram markup from the diagram model and extracts the fenced
/// syntax from the reply.
pub struct GenerationOrchestrator {
    gateway: ModelGateway,
    identity: Arc<dyn IdentityResolver>,
    diagram_model: String,
    image_model: String,
}

impl GenerationOrchestrator {
    /// `config` is validated at its own construction; an empty credential
    /// never reaches this point.
    #[must_use]
    pub fn new(config: &GatewayConfig, identity: Arc<dyn IdentityResolver>) -> Self {
        Self {
            gateway: ModelGateway::new(config),
            identity,
            diagram_model: config.diagram_model.clone(),
            image_model: config.image_model.clone(),
        }
    }

    /// Run one generation request. The caller identity is resolved before
    /// any upstream call; every failure is logged once here and surfaced
    /// as a single error, with no partial result and no retry.
    pub async fn generate(
        &self,
        bearer_token: &str,
        messages: &[Message],
        diagram_type: Option<&str>,
    ) -> GenerationResult<GenerationOutput> {
        let result = self.generate_inner(bearer_token, messages, diagram_type).await;
        if let Err(error) = &result {
            tracing::error!(%error, "generation failed");
        }
        result
    }

    async fn generate_inner(
        &self,
        bearer_token: &str,
        messages: &[Message],
        diagram_type: Option<&str>,
    ) -> GenerationResult<GenerationOutput> {
        let identity = self
            .identity
            .resolve(bearer_token)
            .await?
            .ok_or(GenerationError::Unauthenticated)?;

        let diagram_type = diagram_type.unwrap_or(DEFAULT_DIAGRAM_TYPE);
        tracing::info!(
            user_id = %identity.user_id,
            diagram_type,
            message_count = messages.len(),
            "generate request"
        );

        if diagram_type == PICTURE_TYPE {
            self.generate_image(messages).await
        } else {
            self.generate_diagram(messages, diagram_type).await
        }
    }

    async fn generate_image(&self, messages: &[Message]) -> GenerationResult<GenerationOutput> {
        let request = ChatCompletionRequest {
            model: self.image_model.clone(),
            messages: with_instruction(IMAGE_INSTRUCTION.to_string(), messages),
            modalities: Some(vec![Modality::Image, Modality::Text]),
        };

        let response = self.gateway.chat(&request).await?;
        let message = first_choice_message(response)?;

        let image_url = message
            .images
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|image| image.image_url.url);
        tracing::debug!(has_image = image_url.is_some(), "image generated");

        Ok(GenerationOutput::Image(ImageOutput {
            content: message.content.unwrap_or_default(),
            image_url,
        }))
    }

    async fn generate_diagram(
        &self,
        messages: &[Message],
        diagram_type: &str,
    ) -> GenerationResult<GenerationOutput> {
        let request = ChatCompletionRequest {
            model: self.diagram_model.clone(),
            messages: with_instruction(diagram_instruction(diagram_type), messages),
            modalities: None,
        };

        let response = self.gateway.chat(&request).await?;
        let message = first_choice_message(response)?;

        let content = message.content.unwrap_or_default();
        let mermaid_code = crate::extract_diagram_syntax(&content);

        Ok(GenerationOutput::Diagram(DiagramOutput {
            content,
            mermaid_code,
        }))
    }
}

/// Prepend the system instruction to the forwarded history, preserving
/// the history's order.
fn with_instruction(instruction: String, messages: &[Message]) -> Vec<ChatMessage> {
    let mut chat_messages = Vec::with_capacity(messages.len() + 1);
    chat_messages.push(ChatMessage::system(instruction));
    chat_messages.extend(messages.iter().map(ChatMessage::from));
    chat_messages
}

fn first_choice_message(
    response: crate::gateway::ChatCompletionResponse,
) -> GenerationResult<ChatCompletionMessage> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| GenerationError::Invariant(PROVIDER, "No choices in response".to_string()))
}
