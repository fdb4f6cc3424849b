use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Document, GenerationOutput, StoredQuestion},
        dto::{
            DocumentInsightsDto, GenerateQuestionsRequestDto, ListQuestionsParams,
            QuestionResponseDto,
        },
    },
    repositories::{DocumentRepository, QuestionRepository, TopicRepository},
    services::{fingerprint::fingerprint, question_generator::QuestionGenerator},
};

/// Joins the generation pipeline to document, topic and question storage.
pub struct QuestionService {
    generator: Arc<QuestionGenerator>,
    documents: Arc<dyn DocumentRepository>,
    topics: Arc<dyn TopicRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(
        generator: Arc<QuestionGenerator>,
        documents: Arc<dyn DocumentRepository>,
        topics: Arc<dyn TopicRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            generator,
            documents,
            topics,
            questions,
        }
    }

    pub async fn generate_for_document(
        &self,
        request: GenerateQuestionsRequestDto,
    ) -> AppResult<Vec<QuestionResponseDto>> {
        request.validate()?;

        log::info!(
            "Generating {} questions for document '{}' (types: {:?})",
            request.num_questions,
            request.document_id,
            request.question_types
        );

        let document = self.processed_document(&request.document_id).await?;
        let text = self.source_text(&request, &document).await?;
        let generation_request = request.to_generation_request(text);

        let generator = Arc::clone(&self.generator);
        let GenerationOutput { questions, report } = tokio::task::spawn_blocking(move || {
            generator.generate_with_entropy(&generation_request)
        })
        .await
        .map_err(|e| AppError::InternalError(format!("Generation task failed: {}", e)))??;

        for failed in report.failed_types() {
            log::warn!("Question type {} produced no questions", failed);
        }

        let hashes: Vec<_> = questions
            .iter()
            .map(|q| fingerprint(&q.question_text))
            .collect();
        let mut seen = self.questions.existing_fingerprints(&hashes).await?;
        let now = Utc::now();

        let stored: Vec<StoredQuestion> = questions
            .into_iter()
            .zip(hashes)
            .map(|(question, hash_signature)| {
                let is_duplicate = !seen.insert(hash_signature.clone());
                StoredQuestion {
                    id: Uuid::new_v4().to_string(),
                    document_id: document.id.clone(),
                    question,
                    hash_signature,
                    is_duplicate,
                    created_at: Some(now),
                }
            })
            .collect();

        let duplicates = stored.iter().filter(|q| q.is_duplicate).count();
        let stored = self.questions.insert_many(stored).await?;

        log::info!(
            "Stored {} questions for document '{}' ({} duplicates, {} backfilled, {} short)",
            stored.len(),
            document.id,
            duplicates,
            report.backfilled,
            report.shortfall
        );

        Ok(stored.into_iter().map(QuestionResponseDto::from).collect())
    }

    pub async fn document_insights(
        &self,
        document_id: &str,
        num_topics: usize,
    ) -> AppResult<DocumentInsightsDto> {
        let document = self.processed_document(document_id).await?;
        let text = non_empty_text(document.extracted_text)?;

        let generator = Arc::clone(&self.generator);
        let (topics, complexity) = tokio::task::spawn_blocking(move || {
            let analyzer = generator.analyzer();
            (
                analyzer.identify_topics(&text, num_topics),
                analyzer.text_complexity(&text),
            )
        })
        .await
        .map_err(|e| AppError::InternalError(format!("Analysis task failed: {}", e)))?;

        Ok(DocumentInsightsDto {
            document_id: document.id,
            topics,
            complexity,
        })
    }

    pub async fn list_questions(
        &self,
        params: ListQuestionsParams,
    ) -> AppResult<Vec<QuestionResponseDto>> {
        params.validate()?;

        let questions = self
            .questions
            .find(&params.filter(), params.skip, params.limit)
            .await?;
        Ok(questions.into_iter().map(QuestionResponseDto::from).collect())
    }

    pub async fn get_question(&self, id: &str) -> AppResult<QuestionResponseDto> {
        self.questions
            .find_by_id(id)
            .await?
            .map(QuestionResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Question '{}' not found", id)))
    }

    pub async fn delete_question(&self, id: &str) -> AppResult<()> {
        if !self.questions.delete(id).await? {
            return Err(AppError::NotFound(format!("Question '{}' not found", id)));
        }
        log::info!("Deleted question '{}'", id);
        Ok(())
    }

    async fn processed_document(&self, document_id: &str) -> AppResult<Document> {
        let document = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document '{}' not found", document_id)))?;

        if !document.is_processed {
            return Err(AppError::ValidationError(
                "Document not yet processed. Please process the document first.".to_string(),
            ));
        }
        Ok(document)
    }

    async fn source_text(
        &self,
        request: &GenerateQuestionsRequestDto,
        document: &Document,
    ) -> AppResult<String> {
        let Some(topic_ids) = request.requested_topics() else {
            return non_empty_text(document.extracted_text.clone());
        };

        let topics = self
            .topics
            .find_by_ids_for_document(topic_ids, &document.id)
            .await?;
        if topics.is_empty() {
            return Err(AppError::NotFound("Topics not found".to_string()));
        }

        let text = topics
            .into_iter()
            .filter_map(|t| t.description)
            .collect::<Vec<_>>()
            .join(" ");
        non_empty_text(Some(text))
    }
}

fn non_empty_text(text: Option<String>) -> AppResult<String> {
    text.filter(|t| !t.trim().is_empty()).ok_or_else(|| {
        AppError::ValidationError("No text available for question generation".to_string())
    })
}
