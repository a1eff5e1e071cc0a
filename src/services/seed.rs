use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::instrument;

use crate::models::{MenuItem, MenuType, Room, ServiceResult};
use crate::repositories::{MenuRepository, RoomRepository};

pub const SEED_ROOM_COUNT: u32 = 12;
pub const SEED_ROOM_TYPE: &str = "Deluxe Beachfront";
pub const SEED_ROOM_PRICE: Decimal = dec!(120.00);

/// What a seeding pass inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub rooms_created: usize,
    pub menu_items_created: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.rooms_created == 0 && self.menu_items_created == 0
    }
}

/// The fixed room inventory
pub fn seed_rooms() -> Vec<Room> {
    (1..=SEED_ROOM_COUNT)
        .map(|number| Room::new(number, SEED_ROOM_TYPE, SEED_ROOM_PRICE))
        .collect()
}

/// The fixed bar and restaurant catalogue
pub fn seed_menu() -> Vec<MenuItem> {
    use MenuType::{Bar, Restaurant};

    vec![
        MenuItem::new(
            "bar_1",
            "Mojito",
            "Fresh mint, lime, white rum",
            dec!(8.00),
            "Cocktails",
            Bar,
        ),
        MenuItem::new(
            "bar_2",
            "Piña Colada",
            "Coconut cream, pineapple juice, white rum",
            dec!(9.00),
            "Cocktails",
            Bar,
        ),
        MenuItem::new("bar_3", "Local Beer", "Albanian craft beer", dec!(4.00), "Beer", Bar),
        MenuItem::new("bar_4", "Red Wine", "Local Albanian red wine", dec!(6.00), "Wine", Bar),
        MenuItem::new("bar_5", "Espresso", "Strong Italian coffee", dec!(2.50), "Coffee", Bar),
        MenuItem::new(
            "bar_6",
            "Fresh Orange Juice",
            "Freshly squeezed orange juice",
            dec!(3.50),
            "Non-Alcoholic",
            Bar,
        ),
        MenuItem::new(
            "rest_1",
            "Grilled Sea Bass",
            "Fresh local sea bass with Mediterranean herbs",
            dec!(18.00),
            "Main Course",
            Restaurant,
        ),
        MenuItem::new(
            "rest_2",
            "Albanian Byrek",
            "Traditional Albanian pastry with cheese",
            dec!(8.00),
            "Appetizer",
            Restaurant,
        ),
        MenuItem::new(
            "rest_3",
            "Tavë Kosi",
            "Traditional Albanian baked lamb with yogurt",
            dec!(16.00),
            "Main Course",
            Restaurant,
        ),
        MenuItem::new(
            "rest_4",
            "Greek Salad",
            "Fresh tomatoes, cucumber, feta cheese, olives",
            dec!(9.00),
            "Salad",
            Restaurant,
        ),
        MenuItem::new(
            "rest_5",
            "Grilled Vegetables",
            "Seasonal vegetables grilled to perfection",
            dec!(10.00),
            "Vegetarian",
            Restaurant,
        ),
        MenuItem::new(
            "rest_6",
            "Baklava",
            "Traditional honey and nut pastry",
            dec!(6.00),
            "Dessert",
            Restaurant,
        ),
    ]
}

/// Populates the rooms and menu collections on startup.
///
/// Each collection is only written when it is empty, so running the
/// initializer again never duplicates or modifies existing records.
pub struct SeedInitializer {
    rooms: Arc<dyn RoomRepository>,
    menu: Arc<dyn MenuRepository>,
}

impl SeedInitializer {
    pub fn new(rooms: Arc<dyn RoomRepository>, menu: Arc<dyn MenuRepository>) -> Self {
        Self { rooms, menu }
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> ServiceResult<SeedReport> {
        let mut report = SeedReport::default();

        if self.rooms.count().await? == 0 {
            for room in seed_rooms() {
                self.rooms.create(room).await?;
                report.rooms_created += 1;
            }
            crate::info_with_trace!("Seeded {} rooms", report.rooms_created);
        }

        if self.menu.count().await? == 0 {
            for item in seed_menu() {
                self.menu.create(item).await?;
                report.menu_items_created += 1;
            }
            crate::info_with_trace!("Seeded {} menu items", report.menu_items_created);
        }

        if report.is_empty() {
            crate::info_with_trace!("Seed data already present");
        }

        Ok(report)
    }
}
