//! Case-insensitive name lookup for materials, enchantments, colors and banner
//! patterns.
//!
//! Names are compared after lower-casing and dropping `_`, `-` and spaces, so
//! `light_blue`, `Light Blue` and `LIGHTBLUE` all find `LIGHT_BLUE`.

use std::collections::HashMap;

/// One lookup table from user-written names to canonical identifiers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    by_normalized: HashMap<String, String>,
}

impl Catalog {
    /// Build a catalog whose canonical identifiers are `names` themselves.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for name in names {
            let name = name.into();
            catalog.by_normalized.insert(normalize(&name), name);
        }
        catalog
    }

    /// Add an extra accepted spelling for an existing identifier.
    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.by_normalized
            .insert(normalize(alias), canonical.to_string());
        self
    }

    /// The canonical identifier for `name`, if known.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.by_normalized.get(&normalize(name)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_normalized.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Every lookup the parsers need. Hosts replace the built-in tables with the
/// identifiers their game version actually knows.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub materials: Catalog,
    pub enchantments: Catalog,
    pub dye_colors: Catalog,
    pub pattern_types: Catalog,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            materials: Catalog::from_names(MATERIALS.iter().copied()),
            enchantments: Catalog::from_names(ENCHANTMENTS.iter().copied())
                .with_alias("damage_all", "SHARPNESS")
                .with_alias("dig_speed", "EFFICIENCY")
                .with_alias("durability", "UNBREAKING")
                .with_alias("loot_bonus_blocks", "FORTUNE")
                .with_alias("loot_bonus_mobs", "LOOTING")
                .with_alias("protection_environmental", "PROTECTION")
                .with_alias("arrow_damage", "POWER")
                .with_alias("arrow_infinite", "INFINITY"),
            dye_colors: Catalog::from_names(DYE_COLORS.iter().copied()),
            pattern_types: Catalog::from_names(PATTERN_TYPES.iter().copied()),
        }
    }
}

/// Whether a material identifier denotes air (an empty slot).
pub fn is_air(material: &str) -> bool {
    matches!(material, "AIR" | "CAVE_AIR" | "VOID_AIR")
}

const MATERIALS: &[&str] = &[
    "AIR", "CAVE_AIR", "VOID_AIR", "STONE", "GRASS", "GRASS_BLOCK", "DIRT", "COBBLESTONE",
    "WOOD", "OAK_PLANKS", "SAPLING", "BEDROCK", "SAND", "GRAVEL", "GOLD_ORE", "IRON_ORE",
    "COAL_ORE", "LOG", "OAK_LOG", "LEAVES", "SPONGE", "GLASS", "LAPIS_BLOCK", "DISPENSER",
    "SANDSTONE", "NOTE_BLOCK", "BED", "WOOL", "WHITE_WOOL", "RED_WOOL", "GOLD_BLOCK",
    "IRON_BLOCK", "BRICK", "TNT", "BOOKSHELF", "MOSSY_COBBLESTONE", "OBSIDIAN", "TORCH",
    "CHEST", "DIAMOND_ORE", "DIAMOND_BLOCK", "WORKBENCH", "CRAFTING_TABLE", "FURNACE",
    "LADDER", "RAILS", "RAIL", "LEVER", "REDSTONE_ORE", "ICE", "SNOW_BLOCK", "CACTUS",
    "CLAY", "JUKEBOX", "FENCE", "PUMPKIN", "NETHERRACK", "GLOWSTONE", "STAINED_GLASS",
    "STAINED_GLASS_PANE", "THIN_GLASS", "GLASS_PANE", "MELON_BLOCK", "MELON", "VINE",
    "MYCEL", "MYCELIUM", "ENCHANTMENT_TABLE", "ENCHANTING_TABLE", "ENDER_PORTAL_FRAME",
    "END_PORTAL_FRAME", "ENDER_STONE", "END_STONE", "DRAGON_EGG", "EMERALD_ORE",
    "ENDER_CHEST", "EMERALD_BLOCK", "BEACON", "ANVIL", "REDSTONE_BLOCK", "QUARTZ_BLOCK",
    "HOPPER", "HAY_BLOCK", "CARPET", "COAL_BLOCK", "PACKED_ICE", "IRON_SWORD",
    "IRON_PICKAXE", "FLINT_AND_STEEL", "APPLE", "BOW", "ARROW", "COAL", "DIAMOND",
    "IRON_INGOT", "GOLD_INGOT", "WOOD_SWORD", "WOODEN_SWORD", "STONE_SWORD", "DIAMOND_SWORD",
    "DIAMOND_PICKAXE", "DIAMOND_AXE", "STICK", "BOWL", "MUSHROOM_SOUP", "STRING", "FEATHER",
    "BREAD", "LEATHER_HELMET", "LEATHER_CHESTPLATE", "LEATHER_LEGGINGS", "LEATHER_BOOTS",
    "IRON_HELMET", "IRON_CHESTPLATE", "DIAMOND_HELMET", "DIAMOND_CHESTPLATE",
    "GOLD_HELMET", "GOLDEN_HELMET", "FLINT", "PORK", "PORKCHOP", "PAINTING", "GOLDEN_APPLE",
    "SIGN", "OAK_SIGN", "WATER_BUCKET", "LAVA_BUCKET", "BUCKET", "MINECART", "SADDLE",
    "REDSTONE", "SNOW_BALL", "SNOWBALL", "BOAT", "LEATHER", "MILK_BUCKET", "PAPER", "BOOK",
    "SLIME_BALL", "EGG", "COMPASS", "FISHING_ROD", "WATCH", "CLOCK", "GLOWSTONE_DUST",
    "INK_SACK", "INK_SAC", "BONE", "SUGAR", "CAKE", "COOKIE", "MAP", "SHEARS", "ENDER_PEARL",
    "BLAZE_ROD", "GHAST_TEAR", "GOLD_NUGGET", "POTION", "GLASS_BOTTLE", "SPIDER_EYE",
    "BLAZE_POWDER", "MAGMA_CREAM", "BREWING_STAND_ITEM", "BREWING_STAND", "CAULDRON_ITEM",
    "CAULDRON", "EYE_OF_ENDER", "ENDER_EYE", "SPECKLED_MELON", "EXP_BOTTLE",
    "EXPERIENCE_BOTTLE", "FIREBALL", "FIRE_CHARGE", "BOOK_AND_QUILL", "WRITABLE_BOOK",
    "WRITTEN_BOOK", "EMERALD", "ITEM_FRAME", "FLOWER_POT_ITEM", "FLOWER_POT", "CARROT_ITEM",
    "CARROT", "POTATO_ITEM", "POTATO", "BAKED_POTATO", "EMPTY_MAP", "GOLDEN_CARROT",
    "SKULL_ITEM", "PLAYER_HEAD", "CARROT_STICK", "NETHER_STAR", "PUMPKIN_PIE", "FIREWORK",
    "FIREWORK_ROCKET", "ENCHANTED_BOOK", "NETHER_BRICK_ITEM", "QUARTZ", "NAME_TAG",
    "LEAD", "LEASH", "BANNER", "WHITE_BANNER", "BARRIER", "ARMOR_STAND", "RECORD_3",
    "MUSIC_DISC_BLOCKS", "ELYTRA", "SHIELD", "TOTEM_OF_UNDYING", "TRIDENT",
];

const ENCHANTMENTS: &[&str] = &[
    "PROTECTION", "FIRE_PROTECTION", "FEATHER_FALLING", "BLAST_PROTECTION",
    "PROJECTILE_PROTECTION", "RESPIRATION", "AQUA_AFFINITY", "THORNS", "DEPTH_STRIDER",
    "FROST_WALKER", "BINDING_CURSE", "SHARPNESS", "SMITE", "BANE_OF_ARTHROPODS",
    "KNOCKBACK", "FIRE_ASPECT", "LOOTING", "SWEEPING", "EFFICIENCY", "SILK_TOUCH",
    "UNBREAKING", "FORTUNE", "POWER", "PUNCH", "FLAME", "INFINITY", "LUCK_OF_THE_SEA",
    "LURE", "LOYALTY", "IMPALING", "RIPTIDE", "CHANNELING", "MULTISHOT", "QUICK_CHARGE",
    "PIERCING", "MENDING", "VANISHING_CURSE",
];

const DYE_COLORS: &[&str] = &[
    "WHITE", "ORANGE", "MAGENTA", "LIGHT_BLUE", "YELLOW", "LIME", "PINK", "GRAY",
    "LIGHT_GRAY", "CYAN", "PURPLE", "BLUE", "BROWN", "GREEN", "RED", "BLACK",
];

const PATTERN_TYPES: &[&str] = &[
    "BASE", "SQUARE_BOTTOM_LEFT", "SQUARE_BOTTOM_RIGHT", "SQUARE_TOP_LEFT",
    "SQUARE_TOP_RIGHT", "STRIPE_BOTTOM", "STRIPE_TOP", "STRIPE_LEFT", "STRIPE_RIGHT",
    "STRIPE_CENTER", "STRIPE_MIDDLE", "STRIPE_DOWNRIGHT", "STRIPE_DOWNLEFT",
    "STRIPE_SMALL", "CROSS", "STRAIGHT_CROSS", "TRIANGLE_BOTTOM", "TRIANGLE_TOP",
    "TRIANGLES_BOTTOM", "TRIANGLES_TOP", "DIAGONAL_LEFT", "DIAGONAL_RIGHT",
    "DIAGONAL_LEFT_MIRROR", "DIAGONAL_RIGHT_MIRROR", "CIRCLE_MIDDLE", "RHOMBUS_MIDDLE",
    "HALF_VERTICAL", "HALF_HORIZONTAL", "HALF_VERTICAL_MIRROR", "HALF_HORIZONTAL_MIRROR",
    "BORDER", "CURLY_BORDER", "CREEPER", "GRADIENT", "GRADIENT_UP", "BRICKS", "SKULL",
    "FLOWER", "MOJANG", "GLOBE", "PIGLIN",
];
