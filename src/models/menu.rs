use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::MenuType;

/// Catalogue entry for the bar or restaurant menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub item_id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub menu_type: MenuType,
    pub available: bool,
}

impl MenuItem {
    pub fn new(
        item_id: &str,
        name: &str,
        description: &str,
        price: Decimal,
        category: &str,
        menu_type: MenuType,
    ) -> Self {
        Self {
            item_id: item_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            menu_type,
            available: true,
        }
    }
}

/// Menu items grouped by category.
///
/// Categories keep the order in which they were first seen, and items keep
/// their input order inside a category. Serialized as a JSON object whose keys
/// appear in that same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuCategories {
    groups: Vec<(String, Vec<MenuItem>)>,
}

impl MenuCategories {
    pub fn group(items: impl IntoIterator<Item = MenuItem>) -> Self {
        let mut categories = Self::default();
        for item in items {
            categories.push(item);
        }
        categories
    }

    pub fn push(&mut self, item: MenuItem) {
        match self
            .groups
            .iter_mut()
            .find(|(category, _)| *category == item.category)
        {
            Some((_, items)) => items.push(item),
            None => self.groups.push((item.category.clone(), vec![item])),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[MenuItem]> {
        self.groups
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, items)| items.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }
}

impl Serialize for MenuCategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (category, items) in &self.groups {
            map.serialize_entry(category, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MenuCategories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoriesVisitor;

        impl<'de> Visitor<'de> for CategoriesVisitor {
            type Value = MenuCategories;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from category name to menu items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((category, items)) = access.next_entry::<String, Vec<MenuItem>>()? {
                    groups.push((category, items));
                }
                Ok(MenuCategories { groups })
            }
        }

        deserializer.deserialize_map(CategoriesVisitor)
    }
}

/// Response for `GET /api/menu/{menu_type}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub menu_type: MenuType,
    pub menu: MenuCategories,
}
