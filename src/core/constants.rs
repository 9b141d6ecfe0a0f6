// Character progression
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_GOLD: u32 = 100;
pub const XP_PER_LEVEL_FACTOR: u32 = 100;
pub const LEVEL_UP_HEALTH_BONUS: u32 = 10;
pub const LEVEL_UP_STRENGTH_BONUS: u32 = 2;
pub const LEVEL_UP_MAGIC_BONUS: u32 = 2;
pub const REVIVE_HEALTH_DIVISOR: u32 = 2;
pub const REVIVE_COST_GOLD: u32 = 50;

// Combat
pub const MIN_DAMAGE: u32 = 1;
pub const DEFENSE_DIVISOR: u32 = 4;
pub const CLERIC_HEAL_AMOUNT: u32 = 30;
pub const ESCAPE_SUCCESS_PERCENT: u32 = 50;

// Enemy tier boundaries (inclusive)
pub const GOBLIN_MAX_LEVEL: u32 = 2;
pub const ORC_MAX_LEVEL: u32 = 5;

// Inventory and shop
pub const MAX_INVENTORY_SIZE: usize = 20;
pub const SELL_PRICE_DIVISOR: u32 = 2;

// Quest catalog
pub const NO_PREREQUISITE: &str = "NONE";

// Save system
pub const SAVE_VERSION: u32 = 1;
pub const SAVE_DIR_NAME: &str = ".quest-chronicles";
