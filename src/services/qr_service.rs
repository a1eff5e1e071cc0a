use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;
use tracing::instrument;

use crate::models::{QrCodeResponse, ServiceError, ServiceResult};
use crate::services::menu_service::parse_menu_type;

/// Pixel size of one QR module
pub const MODULE_PIXELS: u32 = 10;
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Ordering page a table QR code points at
pub fn order_url(base_url: &str, menu_type: &str) -> String {
    format!("{}/order/{}", base_url.trim_end_matches('/'), menu_type)
}

/// Render `content` as a PNG QR code with a quiet zone
pub fn render_png(content: &str) -> ServiceResult<Vec<u8>> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::M).map_err(
        |e| ServiceError::QrCode {
            message: e.to_string(),
        },
    )?;

    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .quiet_zone(true)
        .build();

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| ServiceError::QrCode {
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

/// Menu QR codes for tables. Every call renders a fresh image.
#[derive(Debug, Clone, Default)]
pub struct QrService;

impl QrService {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self))]
    pub fn generate(&self, menu_type: &str, base_url: &str) -> ServiceResult<QrCodeResponse> {
        let menu_type = parse_menu_type(menu_type)?;
        let url = order_url(base_url, menu_type.as_str());

        let png = render_png(&url)?;
        crate::info_with_trace!(url = %url, bytes = png.len(), "Rendered menu QR code");

        Ok(QrCodeResponse {
            qr_code: format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(png)),
            url,
            menu_type,
        })
    }
}
