use axum::{
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
};
use image::ImageFormat;

use crate::{
    AppState,
    card::{self, Card},
    fonts,
    handlers::AppError,
    models::RenderRequest,
    theme,
};

/// Render a social preview card from the request's query parameters.
///
/// Fonts are read from disk and remote media fetched concurrently, then the
/// card is rasterized to a fixed 1200x630 PNG.
pub async fn get_card(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let request = RenderRequest::resolve(query.as_deref(), &state.config.card);
    let (fontdb, avatar, logo) = tokio::try_join!(
        fonts::load(&state.config.render.fonts_dir),
        state.fetcher.media(Some(request.avatar.as_str())),
        state.fetcher.media(request.logo.as_deref()),
    )?;
    let card = Card {
        title: request.title,
        description: request.description,
        author: request.author,
        avatar,
        logo,
        palette: theme::lookup(&request.theme),
    };
    let data = card::render_image(&card, fontdb, ImageFormat::Png)?;
    Ok((
        [(header::CONTENT_TYPE, "image/png"), (header::CACHE_CONTROL, "public, max-age=3600")],
        data,
    )
        .into_response())
}
