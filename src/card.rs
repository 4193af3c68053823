use std::sync::Arc;

use anyhow::Result;
use image::ImageFormat;
use maud::{PreEscaped, html};
use resvg::usvg::fontdb;

use crate::{svg, theme::Palette};

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const PAD_X: u32 = 80;
const PAD_Y: u32 = 64;
const CONTENT_WIDTH: u32 = WIDTH - 2 * PAD_X;
const TITLE_SIZE: u32 = 96;
const BODY_SIZE: u32 = 48;
const MEDIA_SIZE: u32 = 56;
const MEDIA_GAP: u32 = 16;
const DESCRIPTION_GAP: u32 = 64;

const FOOTER_TOP: u32 = HEIGHT - PAD_Y - MEDIA_SIZE;
const FOOTER_MID: u32 = FOOTER_TOP + MEDIA_SIZE / 2;
const AVATAR_CX: u32 = PAD_X + MEDIA_SIZE / 2;
const AUTHOR_X: u32 = PAD_X + MEDIA_SIZE + MEDIA_GAP;
const LOGO_X: u32 = WIDTH - PAD_X - MEDIA_SIZE;

// Rough glyph metrics, used to wrap lines and place baselines without
// shaping the text.
const ASCENT: f32 = 0.75;
const AVG_ADVANCE: f32 = 0.5;

/// Resolved artwork for the avatar and logo slots.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum Media {
    /// An embedded image, addressed by a URI the renderer can resolve.
    Image { href: String },
    /// Literal text drawn in the slot, e.g. an emoji or initials.
    Text(String),
    #[default]
    None,
}

#[derive(Debug, Clone)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub author: String,
    pub avatar: Media,
    pub logo: Media,
    pub palette: Option<&'static Palette>,
}

fn wrap(text: &str, size: u32) -> Vec<String> {
    let max_chars = (CONTENT_WIDTH as f32 / (size as f32 * AVG_ADVANCE)) as usize;
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut count = 0usize;
    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if count > 0 && count + 1 + word_chars > max_chars {
            lines.push(std::mem::take(&mut line));
            count = 0;
        }
        if count > 0 {
            line.push(' ');
            count += 1;
        }
        line.push_str(word);
        count += word_chars;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn render_svg(card: &Card) -> String {
    let title_lines = wrap(&card.title, TITLE_SIZE);
    let description_lines = wrap(&card.description, BODY_SIZE);
    // The title grows downward from the top edge, the description upward
    // from the footer.
    let title_first = PAD_Y as f32 + TITLE_SIZE as f32 * ASCENT;
    let description_last =
        (FOOTER_TOP - DESCRIPTION_GAP) as f32 - BODY_SIZE as f32 * (1.0 - ASCENT);
    html! {
        (PreEscaped("<?xml version=\"1.0\" encoding=\"utf-8\"?>"))
        svg xmlns="http://www.w3.org/2000/svg" "xmlns:xlink"="http://www.w3.org/1999/xlink"
            version="1.1" viewBox=(format!("0 0 {WIDTH} {HEIGHT}")) width=(WIDTH) height=(HEIGHT) {
            @if let Media::Image { .. } = card.avatar {
                defs {
                    clipPath id="avatar" {
                        circle cx=(AVATAR_CX) cy=(FOOTER_MID) r=(MEDIA_SIZE / 2) {}
                    }
                }
            }
            rect width="100%" height="100%" fill=(card.palette.map_or("#ffffff", |p| p.background)) {}
            @for (i, line) in title_lines.iter().enumerate() {
                text x=(PAD_X) y=(title_first + (i as u32 * TITLE_SIZE) as f32)
                    font-family="Clash Display, ClashDisplay" font-size=(TITLE_SIZE) fill="#000000" {
                    (line)
                }
            }
            @for (i, line) in description_lines.iter().enumerate() {
                @let above = (description_lines.len() - 1 - i) as u32;
                text x=(PAD_X) y=(description_last - (above * BODY_SIZE) as f32)
                    font-family="Satoshi" font-size=(BODY_SIZE) fill="#111827" {
                    (line)
                }
            }
            @match &card.avatar {
                Media::Image { href } => {
                    @if let Some(palette) = card.palette {
                        circle cx=(AVATAR_CX) cy=(FOOTER_MID) r=(MEDIA_SIZE / 2) fill=(palette.backdrop) {}
                    }
                    image x=(PAD_X) y=(FOOTER_TOP) width=(MEDIA_SIZE) height=(MEDIA_SIZE)
                        "xlink:href"=(href) clip-path="url(#avatar)"
                        preserveAspectRatio="xMidYMid slice" {}
                }
                Media::Text(value) => {
                    text x=(AVATAR_CX) y=(FOOTER_MID) dominant-baseline="central" text-anchor="middle"
                        font-family="Satoshi" font-size=(BODY_SIZE) fill="#000000" {
                        (value)
                    }
                }
                Media::None => {}
            }
            text x=(AUTHOR_X) y=(FOOTER_MID) dominant-baseline="central"
                font-family="Aloe Vera, AloeVera" font-size=(BODY_SIZE)
                fill=(card.palette.map_or("#000000", |p| p.ink)) {
                (card.author)
            }
            @match &card.logo {
                Media::Image { href } => {
                    image x=(LOGO_X) y=(FOOTER_TOP) width=(MEDIA_SIZE) height=(MEDIA_SIZE)
                        "xlink:href"=(href) preserveAspectRatio="xMidYMid meet" {}
                }
                Media::Text(value) => {
                    text x=(WIDTH - PAD_X) y=(FOOTER_MID) dominant-baseline="central" text-anchor="end"
                        font-family="Satoshi" font-size=(BODY_SIZE) fill="#000000" {
                        (value)
                    }
                }
                Media::None => {}
            }
        }
    }
    .into_string()
}

pub fn render_image(
    card: &Card,
    fontdb: Arc<fontdb::Database>,
    format: ImageFormat,
) -> Result<Vec<u8>> {
    let svg = render_svg(card);
    svg::render_image(&svg, fontdb, format)
}
