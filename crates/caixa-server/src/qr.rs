//! QR rendering for the transport authentication challenge
//!
//! The bridge usually forwards the raw pairing payload (`2@...`). It is
//! encoded here as an SVG data URL for the status page and as block
//! characters for the terminal log. A challenge that is already a
//! `data:image/` URL is used as-is.

use base64::Engine;
use qrcode::render::{svg, unicode};
use qrcode::QrCode;
use tracing::warn;

fn encode(challenge: &str) -> Option<QrCode> {
    match QrCode::new(challenge.as_bytes()) {
        Ok(code) => Some(code),
        Err(e) => {
            warn!(error = %e, len = challenge.len(), "Challenge cannot be encoded as a QR code");
            None
        }
    }
}

pub fn is_image_url(challenge: &str) -> bool {
    challenge.starts_with("data:image/")
}

/// `<img>` source for the challenge, or None if it cannot be encoded
pub fn challenge_image_src(challenge: &str) -> Option<String> {
    if is_image_url(challenge) {
        return Some(challenge.to_string());
    }

    let image = encode(challenge)?
        .render::<svg::Color>()
        .min_dimensions(256, 256)
        .build();
    Some(format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(image)
    ))
}

/// Terminal rendering of a raw challenge
pub fn terminal_qr(challenge: &str) -> Option<String> {
    if is_image_url(challenge) {
        return None;
    }

    let art = encode(challenge)?
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build();
    Some(art)
}
