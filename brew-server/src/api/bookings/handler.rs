//! Bookings API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::BookingCreate;
use crate::db::repository::counter::SEQ_BOOKINGS;
use crate::db::repository::{BookingRepository, CounterRepository};
use crate::utils::time::{parse_date, parse_time, validate_not_past};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_email, validate_optional_text, validate_required_text,
};
use shared::models::{
    Booking, BookingRequest, BookingStatus, MAX_PARTY_SIZE, MIN_PARTY_SIZE, StatusUpdate,
};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

/// POST /api/bookings - 门店订座
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingRequest>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    validate_required_text(&payload.customer.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.customer.email)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    if payload.party_size < MIN_PARTY_SIZE || payload.party_size > MAX_PARTY_SIZE {
        return Err(AppError::with_message(
            ErrorCode::BookingInvalidPartySize,
            format!(
                "Party size must be between {} and {}",
                MIN_PARTY_SIZE, MAX_PARTY_SIZE
            ),
        ));
    }

    let date = parse_date(&payload.date)?;
    parse_time(&payload.time)?;
    validate_not_past(date)
        .map_err(|_| AppError::new(ErrorCode::BookingDateInPast))?;

    let db = state.get_db();
    let sequence = CounterRepository::new(db.clone()).next(SEQ_BOOKINGS).await?;
    let booking = BookingRepository::new(db)
        .create(BookingCreate {
            reference: format!("BKG-{:06}", sequence),
            customer: payload.customer,
            party_size: payload.party_size,
            date: payload.date,
            time: payload.time,
            notes: payload.notes,
        })
        .await?;

    tracing::info!(
        reference = %booking.reference,
        party_size = booking.party_size,
        date = %booking.date,
        "Table booking received"
    );

    Ok(Json(ApiResponse::success(booking.into())))
}

/// GET /api/bookings - 后台订座看板
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Booking>>>> {
    let repo = BookingRepository::new(state.get_db());
    let bookings = repo.find_all().await?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(Into::into).collect(),
    )))
}

/// PUT /api/bookings/:id/status - 推进订座状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate<BookingStatus>>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let repo = BookingRepository::new(state.get_db());
    let booking = repo
        .update_status(&id, payload.status)
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::Validation(msg) => {
                AppError::with_message(ErrorCode::BookingInvalidTransition, msg)
            }
            other => other.into(),
        })?;
    Ok(Json(ApiResponse::success(booking.into())))
}
