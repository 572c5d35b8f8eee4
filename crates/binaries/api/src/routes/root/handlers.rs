/// Health check.
#[utoipa::path(
    get,
    path = "/",
    tag = "Root",
    responses(
        (status = 200, description = "The service is up.", body = String),
    )
)]
pub async fn root() -> &'static str {
    "Photo Picks API is running"
}
