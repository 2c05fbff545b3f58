//! Bar catalog, review, check-in, favorite, and photo handlers.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Bar, BarPhoto, BarUpdate, CheckIn, NewBar, Review, UserAchievement};

use super::error::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Default search radius for `GET /api/bars?lat&lng`, in kilometres.
const DEFAULT_NEARBY_RADIUS_KM: f64 = 25.0;

#[derive(Debug, Deserialize, IntoParams)]
pub struct BarsQuery {
    /// Full-text query over name, description, and city.
    search: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    /// Radius in kilometres, used with `lat`/`lng`.
    radius: Option<f64>,
}

/// List bars. `search` takes precedence over `lat`/`lng`; with neither,
/// returns the top-rated bars.
#[utoipa::path(
    get,
    path = "/api/bars",
    tag = "bars",
    params(BarsQuery),
    responses(
        (status = 200, description = "Matching bars", body = [Bar]),
        (status = 400, description = "Invalid query parameters")
    )
)]
pub async fn list_bars(
    state: web::Data<HttpState>,
    query: web::Query<BarsQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let bars = if let Some(search) = query.search {
        state.bars.search(&search).await?
    } else if let (Some(lat), Some(lng)) = (query.lat, query.lng) {
        let radius = query.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);
        state.bars.nearby(lat, lng, radius).await?
    } else {
        state.bars.list().await?
    };
    Ok(HttpResponse::Ok().json(bars))
}

/// Fetch one bar by id or slug.
#[utoipa::path(
    get,
    path = "/api/bars/{key}",
    tag = "bars",
    params(("key", description = "Bar id (UUID) or slug")),
    responses(
        (status = 200, description = "The bar", body = Bar),
        (status = 404, description = "No such bar")
    )
)]
pub async fn get_bar(
    state: web::Data<HttpState>,
    key: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let key = key.into_inner();
    let bar = match Uuid::parse_str(&key) {
        Ok(id) => state.bars.get(id).await?,
        Err(_) => state.bars.get_by_slug(&key).await?,
    };
    Ok(HttpResponse::Ok().json(bar))
}

/// Add a bar to the catalog.
#[utoipa::path(
    post,
    path = "/api/bars",
    tag = "bars",
    request_body = NewBar,
    responses(
        (status = 201, description = "Bar created", body = Bar),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_bar(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<NewBar>,
) -> ApiResult<HttpResponse> {
    session.require_identity()?;
    let bar = state.bars.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(bar))
}

/// Partially update a bar.
#[utoipa::path(
    patch,
    path = "/api/bars/{id}",
    tag = "bars",
    request_body = BarUpdate,
    responses(
        (status = 200, description = "Updated bar", body = Bar),
        (status = 400, description = "Empty or invalid update"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such bar")
    )
)]
pub async fn update_bar(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
    body: web::Json<BarUpdate>,
) -> ApiResult<HttpResponse> {
    session.require_identity()?;
    let bar = state.bars.update(id.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(bar))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBody {
    rating: i32,
    comment: Option<String>,
    photo_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreated {
    review: Review,
    /// Bar-level aggregate refreshed in the same transaction.
    #[schema(value_type = Object)]
    rating_summary: crate::domain::review::RatingSummary,
}

/// Reviews for a bar, newest first.
#[utoipa::path(
    get,
    path = "/api/bars/{bar_id}/reviews",
    tag = "reviews",
    responses((status = 200, description = "Reviews", body = [Review]))
)]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    bar_id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let reviews = state.reviews.for_bar(bar_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// Submit a review for a bar.
#[utoipa::path(
    post,
    path = "/api/bars/{bar_id}/reviews",
    tag = "reviews",
    request_body = ReviewBody,
    responses(
        (status = 201, description = "Review recorded", body = ReviewCreated),
        (status = 400, description = "Rating out of range"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such bar")
    )
)]
pub async fn create_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    bar_id: web::Path<Uuid>,
    body: web::Json<ReviewBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let body = body.into_inner();
    let (review, rating_summary) = state
        .reviews
        .submit(
            bar_id.into_inner(),
            user_id,
            body.rating,
            body.comment,
            body.photo_url,
        )
        .await?;
    Ok(HttpResponse::Created().json(ReviewCreated {
        review,
        rating_summary,
    }))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInBody {
    note: Option<String>,
    photo_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInCreated {
    check_in: CheckIn,
    /// Achievements granted as a result of this check-in.
    unlocked: Vec<UserAchievement>,
}

/// Check in at a bar, earning points and possibly achievements.
#[utoipa::path(
    post,
    path = "/api/bars/{bar_id}/checkin",
    tag = "check-ins",
    request_body = CheckInBody,
    responses(
        (status = 201, description = "Check-in recorded", body = CheckInCreated),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such bar")
    )
)]
pub async fn check_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    bar_id: web::Path<Uuid>,
    body: Option<web::Json<CheckInBody>>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    let outcome = state
        .check_ins
        .record(bar_id.into_inner(), user_id, body.note, body.photo_url)
        .await?;
    Ok(HttpResponse::Created().json(CheckInCreated {
        check_in: outcome.check_in,
        unlocked: outcome.unlocked,
    }))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoBody {
    image_url: String,
    caption: Option<String>,
}

/// Photos of a bar, newest first.
#[utoipa::path(
    get,
    path = "/api/bars/{bar_id}/photos",
    tag = "photos",
    responses((status = 200, description = "Photos", body = [BarPhoto]))
)]
pub async fn list_photos(
    state: web::Data<HttpState>,
    bar_id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let photos = state.photos.for_bar(bar_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(photos))
}

/// Attach a photo to a bar.
#[utoipa::path(
    post,
    path = "/api/bars/{bar_id}/photos",
    tag = "photos",
    request_body = PhotoBody,
    responses(
        (status = 201, description = "Photo attached", body = BarPhoto),
        (status = 400, description = "Missing image URL"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No such bar")
    )
)]
pub async fn add_photo(
    state: web::Data<HttpState>,
    session: SessionContext,
    bar_id: web::Path<Uuid>,
    body: web::Json<PhotoBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let body = body.into_inner();
    let photo = state
        .photos
        .attach(bar_id.into_inner(), user_id, body.image_url, body.caption)
        .await?;
    Ok(HttpResponse::Created().json(photo))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteToggled {
    favorited: bool,
}

/// Toggle a bar in the user's favorites.
#[utoipa::path(
    post,
    path = "/api/bars/{bar_id}/favorite",
    tag = "favorites",
    responses(
        (status = 200, description = "New favorite state", body = FavoriteToggled),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn toggle_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    bar_id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let favorited = state.favorites.toggle(&user_id, bar_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(FavoriteToggled { favorited }))
}

/// Register the bar routes under `/api/bars`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bars")
            .service(
                web::resource("")
                    .route(web::get().to(list_bars))
                    .route(web::post().to(create_bar)),
            )
            .service(
                web::resource("/{bar_id}/reviews")
                    .route(web::get().to(list_reviews))
                    .route(web::post().to(create_review)),
            )
            .service(
                web::resource("/{bar_id}/photos")
                    .route(web::get().to(list_photos))
                    .route(web::post().to(add_photo)),
            )
            .route("/{bar_id}/checkin", web::post().to(check_in))
            .route("/{bar_id}/favorite", web::post().to(toggle_favorite))
            .service(
                web::resource("/{key}")
                    .route(web::get().to(get_bar))
                    .route(web::patch().to(update_bar)),
            ),
    );
}
