use std::sync::Arc;
use tracing::instrument;

use crate::models::{MenuCategories, MenuResponse, MenuType, ServiceError, ServiceResult};
use crate::repositories::MenuRepository;

/// Parse a menu type path segment, mapping unknown values to `InvalidMenuType`
pub fn parse_menu_type(menu_type: &str) -> ServiceResult<MenuType> {
    menu_type
        .parse()
        .map_err(|_| ServiceError::InvalidMenuType {
            menu_type: menu_type.to_string(),
        })
}

/// Bar and restaurant menus, grouped by category
pub struct MenuService {
    repository: Arc<dyn MenuRepository>,
}

impl MenuService {
    pub fn new(repository: Arc<dyn MenuRepository>) -> Self {
        Self { repository }
    }

    /// Available items of one menu grouped by category in first-seen order
    #[instrument(skip(self))]
    pub async fn get_menu(&self, menu_type: &str) -> ServiceResult<MenuResponse> {
        let menu_type = parse_menu_type(menu_type)?;

        let items = self.repository.find_available_by_type(menu_type).await?;
        let menu = MenuCategories::group(items);

        crate::info_with_trace!(
            categories = menu.len(),
            items = menu.item_count(),
            "Menu retrieved"
        );

        Ok(MenuResponse { menu_type, menu })
    }
}
