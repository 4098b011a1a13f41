//! `trigger_feedback_for_session` (§4.5): the background pipeline that runs
//! once a session completes — evaluation, then gaze linkage, then
//! improvement-plan generation. Spawned with `tokio::spawn` from
//! `InterviewService::submit_user_answer` and never awaited by the caller.

use std::sync::Arc;

use interview_core::traits::{
    keys, EvaluationClient, GazeAnalysisRecord, GazeAnalyzer, GazeRepository, HistoryDetailRecord,
    InterviewRecord, InterviewRepository, MediaFileRecord, MediaRepository, ObjectStore,
};
use interview_orchestrator::Orchestrator;

use crate::service::FeedbackCollaborators;

/// Extension the temp gaze-video upload is assumed to use; the source system
/// doesn't constrain this further, so the same extension is used in both the
/// key written by the capture client and the key looked up here.
const TEMP_GAZE_EXT: &str = "mp4";

pub async fn trigger_feedback_for_session(
    session_id: String,
    orchestrator: Arc<Orchestrator>,
    collaborators: Arc<FeedbackCollaborators>,
) {
    tokio::time::sleep(crate::service::FEEDBACK_DELAY).await;

    if !orchestrator.try_mark_feedback_triggered().await {
        // Another caller already ran (or is running) this pipeline.
        return;
    }

    let snapshot = orchestrator.snapshot().await;
    let (user_qa, ai_qa): (Vec<_>, Vec<_>) = snapshot.split_by_answerer();
    let user_qa: Vec<_> = user_qa.into_iter().cloned().collect();
    let ai_qa: Vec<_> = ai_qa.into_iter().cloned().collect();

    let outcome = match collaborators.evaluation.evaluate(&user_qa, &ai_qa).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(session_id = %session_id, error = %err, "evaluation failed, skipping feedback pipeline");
            return;
        }
    };

    let interview_id = uuid::Uuid::new_v4().to_string();

    if let Err(err) = collaborators
        .interviews
        .create_interview(InterviewRecord {
            interview_id: interview_id.clone(),
            user_id: snapshot.user_id.clone(),
            company_id: snapshot.company_id.clone(),
            position_id: snapshot.position.clone(),
            posting_id: snapshot.posting_id.clone(),
            created_at: chrono::Utc::now(),
        })
        .await
    {
        tracing::warn!(session_id = %session_id, error = %err, "failed to persist interview record");
        return;
    }

    let mut details = Vec::with_capacity(user_qa.len() + ai_qa.len());
    for (sequence, entry) in snapshot.qa_history.iter().enumerate() {
        let who = match entry.answerer {
            interview_core::answer::Answerer::User => "user",
            interview_core::answer::Answerer::Ai => "ai",
        };
        details.push(HistoryDetailRecord {
            interview_id: interview_id.clone(),
            who: who.to_string(),
            sequence: sequence as u32,
            qa: entry.clone(),
            feedback: None,
        });
    }
    if let Err(err) = collaborators.interviews.write_history_details(details).await {
        tracing::warn!(session_id = %session_id, error = %err, "failed to persist history details");
    }

    link_gaze_analysis(&session_id, &interview_id, &snapshot.user_id, &collaborators).await;

    if let Err(err) = collaborators.evaluation.generate_improvement_plan(&interview_id).await {
        tracing::warn!(session_id = %session_id, interview_id = %interview_id, error = %err, "improvement plan generation failed");
    }

    tracing::info!(
        session_id = %session_id,
        interview_id = %interview_id,
        user_score = outcome.user_score,
        ai_score = outcome.ai_score,
        "feedback pipeline completed"
    );
}

/// Gaze linkage precedence (§9 Open Question, resolved): a local temp-file
/// upload takes priority over a previously-completed pre-signed-URL task,
/// since it is synchronous and keeps the `media_files` write atomic with the
/// analysis call; the pre-signed path is only consulted when no temp file
/// exists.
async fn link_gaze_analysis(
    session_id: &str,
    interview_id: &str,
    user_id: &Option<String>,
    collaborators: &FeedbackCollaborators,
) {
    let temp_key = keys::temp_gaze_path(session_id, TEMP_GAZE_EXT);

    if collaborators.object_store.presign_get(&temp_key).await.is_ok() {
        let target_key = format!("{}{}", keys::post_interview_gaze_prefix(interview_id), temp_key);

        match collaborators.gaze_analyzer.analyze(&temp_key).await {
            Ok(outcome) => {
                record_gaze_result(collaborators, interview_id, user_id, &target_key, outcome).await;
            }
            Err(err) => {
                tracing::warn!(session_id = %session_id, error = %err, "gaze analysis of temp file failed");
            }
        }
        return;
    }

    match collaborators.gaze_analyzer.find_completed_task(session_id).await {
        Ok(Some(task)) => {
            record_gaze_result(collaborators, interview_id, user_id, &task.s3_key, task.outcome).await;
        }
        Ok(None) => {
            tracing::debug!(session_id = %session_id, "no gaze artifact available via either linkage path");
        }
        Err(err) => {
            tracing::warn!(session_id = %session_id, error = %err, "pre-signed gaze task lookup failed");
        }
    }
}

async fn record_gaze_result(
    collaborators: &FeedbackCollaborators,
    interview_id: &str,
    user_id: &Option<String>,
    s3_key: &str,
    outcome: interview_core::traits::GazeAnalysisOutcome,
) {
    if let Err(err) = collaborators
        .media
        .insert_media_file(MediaFileRecord {
            media_id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.clone(),
            interview_id: interview_id.to_string(),
            file_name: s3_key.to_string(),
            file_type: "video/gaze".to_string(),
            s3_key: s3_key.to_string(),
            s3_url: None,
            file_size: 0,
        })
        .await
    {
        tracing::warn!(interview_id = %interview_id, error = %err, "failed to persist gaze media file record");
        return;
    }

    if let Err(err) = collaborators
        .gaze_repo
        .insert_gaze_analysis(GazeAnalysisRecord {
            gaze_id: uuid::Uuid::new_v4().to_string(),
            interview_id: interview_id.to_string(),
            user_id: user_id.clone(),
            gaze_score: outcome.gaze_score,
            jitter_score: outcome.jitter_score,
            compliance_score: outcome.compliance_score,
            stability_rating: outcome.stability_rating,
        })
        .await
    {
        tracing::warn!(interview_id = %interview_id, error = %err, "failed to persist gaze analysis record");
    }
}
