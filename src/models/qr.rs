use serde::{Deserialize, Serialize};

use super::MenuType;

/// Response for `GET /api/qr-code/{menu_type}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCodeResponse {
    /// `data:image/png;base64,...`
    pub qr_code: String,
    /// The ordering page the code points at
    pub url: String,
    pub menu_type: MenuType,
}
