//! Offline generator with fixed replies
//!
//! Used when no completion service is configured. Replies depend only on the
//! category, so the same question always gets the same answer.

use super::{GenerateError, Generation, GenerationRequest, ResponseGenerator};
use crate::classifier::Category;
use async_trait::async_trait;

const DISEASE_REPLY: &str = "Based on the symptoms you've described, this could be related to several conditions. Common possibilities include a viral infection, tension headache, or mild dehydration. If the symptoms persist for more than a few days or get worse, please consult a healthcare provider.";

const MEDICINE_REPLY: &str = "For mild pain relief, over-the-counter options like acetaminophen or ibuprofen are commonly used. Always follow the dosage instructions on the packaging, and check with a pharmacist about interactions with other medications you take.";

const TREATMENT_REPLY: &str = "Treatment options may include rest, staying hydrated, and over-the-counter medications for symptom relief. If symptoms persist or worsen, consult a healthcare provider for a personalised plan.";

const UNCLEAR_REPLY: &str = "I'm not sure I understand. Could you provide more details about your health concern? You can ask me about symptoms, medicines, or treatments.";

#[derive(Debug, Default, Clone)]
pub struct CannedGenerator;

impl CannedGenerator {
    pub fn reply_for(category: Option<Category>) -> &'static str {
        match category {
            Some(Category::Disease) => DISEASE_REPLY,
            Some(Category::Medicine) => MEDICINE_REPLY,
            Some(Category::Treatment) => TREATMENT_REPLY,
            None => UNCLEAR_REPLY,
        }
    }
}

#[async_trait]
impl ResponseGenerator for CannedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GenerateError> {
        Ok(Generation::new(Self::reply_for(request.category)))
    }

    fn name(&self) -> &str {
        "canned"
    }
}
