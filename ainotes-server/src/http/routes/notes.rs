//! Note endpoints
//!
//! Each handler performs exactly one repository call. Titles and tags
//! are normalised here; content is passed through untouched.

use std::sync::Arc;

use ainotes_core::{Note, NotePayload};
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::db::clock;
use crate::db::repos::NoteRepo;
use crate::http::error::ApiError;
use crate::http::extractors::NoteId;
use crate::http::server::AppState;
use crate::models::{NoteTags, NoteTitle};

/// GET /notes - all notes, most recently updated first
async fn list_notes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = NoteRepo::new(&state.pool).list_all().await?;
    Ok(Json(notes.into_iter().map(Note::from).collect()))
}

/// POST /notes - create a note
async fn create_note(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NotePayload>,
) -> Result<Json<Note>, ApiError> {
    let title = NoteTitle::normalize(&req.title);
    let tags = NoteTags::normalize(&req.tags);

    let note = NoteRepo::new(&state.pool)
        .insert(&title, &req.content, &tags)
        .await?;

    Ok(Json(Note::from(note)))
}

/// GET /notes/{id} - a single note
///
/// A missing id answers 200 with the id -1 placeholder instead of 404.
/// Update and delete do return 404; clients depend on this asymmetry.
async fn get_note(
    State(state): State<Arc<AppState>>,
    NoteId(id): NoteId,
) -> Result<Json<Note>, ApiError> {
    match NoteRepo::new(&state.pool).get(id).await? {
        Some(note) => Ok(Json(Note::from(note))),
        None => {
            tracing::debug!(id, "Note not found, returning placeholder");
            Ok(Json(Note::placeholder(clock::now())))
        }
    }
}

/// PUT /notes/{id} - replace title, content and tags
async fn update_note(
    State(state): State<Arc<AppState>>,
    NoteId(id): NoteId,
    Json(req): Json<NotePayload>,
) -> Result<Json<Note>, ApiError> {
    let title = NoteTitle::normalize(&req.title);
    let tags = NoteTags::normalize(&req.tags);

    let note = NoteRepo::new(&state.pool)
        .update(id, &title, &req.content, &tags)
        .await?;

    Ok(Json(Note::from(note)))
}

/// DELETE /notes/{id} - remove a note
async fn delete_note(
    State(state): State<Arc<AppState>>,
    NoteId(id): NoteId,
) -> Result<StatusCode, ApiError> {
    NoteRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Note routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::db::{create_memory_pool, migrations};

    async fn app() -> Router {
        let pool = create_memory_pool().await.unwrap();
        migrations::run(&pool).await.unwrap();
        router().with_state(Arc::new(AppState { pool }))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_owned()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn note(bytes: &[u8]) -> Note {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn create_defaults_blank_title() {
        let app = app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/notes",
            Some(r#"{"title": "  ", "content": "hi", "tags": ""}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let created = note(&body);
        assert_eq!(created.title, "Untitled");
        assert_eq!(created.content, "hi");
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn create_trims_title_and_tags_but_not_content() {
        let app = app().await;
        let (_, body) = send(
            &app,
            "POST",
            "/notes",
            Some(r#"{"title": " Plan ", "content": "  keep me  ", "tags": " work, ideas "}"#),
        )
        .await;

        let created = note(&body);
        assert_eq!(created.title, "Plan");
        assert_eq!(created.content, "  keep me  ");
        assert_eq!(created.tags, "work, ideas");
    }

    #[tokio::test]
    async fn create_without_tags() {
        let app = app().await;
        let (status, body) =
            send(&app, "POST", "/notes", Some(r#"{"title": "t", "content": "c"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(note(&body).tags, "");
    }

    #[tokio::test]
    async fn get_returns_created_note() {
        let app = app().await;
        let (_, body) =
            send(&app, "POST", "/notes", Some(r#"{"title": "t", "content": "c"}"#)).await;
        let created = note(&body);

        let (status, body) = send(&app, "GET", &format!("/notes/{}", created.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(note(&body), created);
    }

    #[tokio::test]
    async fn get_missing_returns_placeholder_not_404() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/notes/999", None).await;

        assert_eq!(status, StatusCode::OK);
        let placeholder = note(&body);
        assert_eq!(placeholder.id, -1);
        assert_eq!(placeholder.title, "Not found");
    }

    #[tokio::test]
    async fn get_non_integer_id_is_400() {
        let app = app().await;
        let (status, _) = send(&app, "GET", "/notes/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_missing_is_404() {
        let app = app().await;
        let (status, body) = send(
            &app,
            "PUT",
            "/notes/5",
            Some(r#"{"title": "t", "content": "c"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["detail"], "Note not found");

        let (_, body) = send(&app, "GET", "/notes", None).await;
        let notes: Vec<Note> = serde_json::from_slice(&body).unwrap();
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn update_blank_title_becomes_untitled() {
        let app = app().await;
        let (_, body) =
            send(&app, "POST", "/notes", Some(r#"{"title": "t", "content": "c"}"#)).await;
        let created = note(&body);

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/notes/{}", created.id),
            Some(r#"{"title": "", "content": "c2", "tags": " x "}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let updated = note(&body);
        assert_eq!(updated.title, "Untitled");
        assert_eq!(updated.tags, "x");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn delete_returns_204_then_404() {
        let app = app().await;
        let (_, body) =
            send(&app, "POST", "/notes", Some(r#"{"title": "t", "content": "c"}"#)).await;
        let uri = format!("/notes/{}", note(&body).id);

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(note(&body).is_placeholder());
    }

    #[tokio::test]
    async fn list_reflects_latest_update_first() {
        let app = app().await;
        let (_, a) = send(&app, "POST", "/notes", Some(r#"{"title": "A", "content": ""}"#)).await;
        let (_, b) = send(&app, "POST", "/notes", Some(r#"{"title": "B", "content": ""}"#)).await;
        let (a, b) = (note(&a), note(&b));

        send(
            &app,
            "PUT",
            &format!("/notes/{}", a.id),
            Some(r#"{"title": "A", "content": "edited"}"#),
        )
        .await;

        let (status, body) = send(&app, "GET", "/notes", None).await;
        assert_eq!(status, StatusCode::OK);
        let notes: Vec<Note> = serde_json::from_slice(&body).unwrap();
        assert_eq!(notes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn oversized_title_is_500() {
        let app = app().await;
        let body = serde_json::json!({ "title": "x".repeat(201), "content": "" }).to_string();
        let (status, _) = send(&app, "POST", "/notes", Some(&body)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
