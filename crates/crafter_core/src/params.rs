//! Generation parameters and their enumerated option sets.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Visual rendering style for a generated avatar.
///
/// Styles partition into 3D renditions (the first four) and 2D renditions;
/// the transform client selects different render instructions per partition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum AvatarStyle {
    /// 3D matte clay
    MatteClay,
    /// 3D glossy plastic
    GlossyPlastic,
    /// 3D neon hologram
    NeonGlow,
    /// 3D crystal glass
    Crystal,
    /// Trendy anime
    AnimeTrendy,
    /// Minimal flat vector
    VectorFlat,
    /// Retro 8-bit pixel art
    PixelArt,
    /// Retro 1-bit dithered
    RetroDithered,
    /// Hand-drawn line sketch
    SketchLineart,
    /// Classical impasto oil painting
    OilPainting,
    /// Pop-art collage
    PopArt,
}

impl AvatarStyle {
    /// Human-readable label used in prompts and listings.
    pub fn label(&self) -> &'static str {
        match self {
            AvatarStyle::MatteClay => "3D matte clay",
            AvatarStyle::GlossyPlastic => "3D glossy plastic",
            AvatarStyle::NeonGlow => "3D neon hologram",
            AvatarStyle::Crystal => "3D crystal glass",
            AvatarStyle::AnimeTrendy => "trendy anime",
            AvatarStyle::VectorFlat => "minimal flat vector",
            AvatarStyle::PixelArt => "retro 8-bit pixel art",
            AvatarStyle::RetroDithered => "retro 1-bit dithered",
            AvatarStyle::SketchLineart => "hand-drawn line sketch",
            AvatarStyle::OilPainting => "classical impasto oil painting",
            AvatarStyle::PopArt => "pop-art collage",
        }
    }

    /// Whether this style belongs to the 3D partition.
    pub fn is_three_dimensional(&self) -> bool {
        matches!(
            self,
            AvatarStyle::MatteClay
                | AvatarStyle::GlossyPlastic
                | AvatarStyle::NeonGlow
                | AvatarStyle::Crystal
        )
    }
}

/// Accessory worn by the generated avatar.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Accessory {
    None,
    Sunglasses,
    CyberGoggles,
    Beanie,
    BaseballCap,
    BucketHat,
    Headphones,
    GoldChain,
    Crown,
    OnigiriMask,
    Halo,
    DevilHorns,
}

impl Accessory {
    /// Human-readable label used in prompts and listings.
    pub fn label(&self) -> &'static str {
        match self {
            Accessory::None => "none",
            Accessory::Sunglasses => "cool sunglasses",
            Accessory::CyberGoggles => "cybernetic goggles",
            Accessory::Beanie => "knit beanie",
            Accessory::BaseballCap => "street baseball cap",
            Accessory::BucketHat => "designer bucket hat",
            Accessory::Headphones => "studio headphones",
            Accessory::GoldChain => "heavy gold chain",
            Accessory::Crown => "royal crown",
            Accessory::OnigiriMask => "festival mask",
            Accessory::Halo => "angelic halo",
            Accessory::DevilHorns => "devil horns",
        }
    }
}

/// Clothing worn by the generated avatar.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Clothing {
    None,
    Hoodie,
    Jacket,
    Sweater,
    Techwear,
    Suit,
    Kimono,
    Armor,
    ChineseRobe,
}

impl Clothing {
    /// Human-readable label used in prompts and listings.
    pub fn label(&self) -> &'static str {
        match self {
            Clothing::None => "none",
            Clothing::Hoodie => "athletic hoodie",
            Clothing::Jacket => "biker leather jacket",
            Clothing::Sweater => "vintage sweater",
            Clothing::Techwear => "tactical techwear",
            Clothing::Suit => "tailored suit",
            Clothing::Kimono => "kimono haori",
            Clothing::Armor => "futuristic mech armor",
            Clothing::ChineseRobe => "embroidered robe",
        }
    }
}

/// Scene background behind the generated avatar.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Background {
    StudioGrey,
    PastelRainbow,
    VibrantGradient,
    CyberpunkStreet,
    MinimalWhite,
    TraditionalZen,
    SpaceNebula,
    DoodleWall,
}

impl Background {
    /// Human-readable label used in prompts and listings.
    pub fn label(&self) -> &'static str {
        match self {
            Background::StudioGrey => "studio grey",
            Background::PastelRainbow => "pastel rainbow",
            Background::VibrantGradient => "vibrant gradient",
            Background::CyberpunkStreet => "cyberpunk street",
            Background::MinimalWhite => "minimal white",
            Background::TraditionalZen => "zen landscape",
            Background::SpaceNebula => "deep-space nebula",
            Background::DoodleWall => "graffiti doodle wall",
        }
    }
}

/// Immutable snapshot of user configuration at batch-creation time.
///
/// A batch captures params by value; later edits to a live form value never
/// mutate an in-flight or completed batch.
///
/// # Examples
///
/// ```
/// use crafter_core::{AvatarStyle, GenerationParams};
///
/// let params = GenerationParams::builder()
///     .style(AvatarStyle::PixelArt)
///     .quantity(4)
///     .build()
///     .unwrap();
///
/// assert_eq!(params.quantity, 4);
/// assert_eq!(params.intensity, 75);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct GenerationParams {
    /// Visual rendering style
    #[builder(default = "AvatarStyle::MatteClay")]
    pub style: AvatarStyle,
    /// Accessory selection
    #[builder(default = "Accessory::Sunglasses")]
    pub accessory: Accessory,
    /// Clothing selection
    #[builder(default = "Clothing::Hoodie")]
    pub clothing: Clothing,
    /// Scene background
    #[builder(default = "Background::PastelRainbow")]
    pub background: Background,
    /// Transformation intensity, 0-100
    #[builder(default = "75")]
    pub intensity: u8,
    /// Optional free-text creative theme
    #[builder(default)]
    pub theme: Option<String>,
    /// Randomize accessory, clothing and intensity
    #[builder(default)]
    pub is_random: bool,
    /// Randomize the creative theme
    #[builder(default)]
    pub randomize_theme: bool,
    /// Number of pieces to generate, 1-9
    #[builder(default = "1")]
    pub quantity: usize,
}

impl GenerationParams {
    /// Smallest accepted batch quantity.
    pub const MIN_QUANTITY: usize = 1;
    /// Largest accepted batch quantity.
    pub const MAX_QUANTITY: usize = 9;

    /// Start building a parameter set.
    pub fn builder() -> GenerationParamsBuilder {
        GenerationParamsBuilder::default()
    }

    /// Intensity actually sent to the model. Random mode pins it to 85.
    pub fn effective_intensity(&self) -> u8 {
        if self.is_random { 85 } else { self.intensity }
    }

    /// The theme text, if one was set and is non-empty.
    pub fn theme_text(&self) -> Option<&str> {
        self.theme
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            style: AvatarStyle::MatteClay,
            accessory: Accessory::Sunglasses,
            clothing: Clothing::Hoodie,
            background: Background::PastelRainbow,
            intensity: 75,
            theme: None,
            is_random: false,
            randomize_theme: false,
            quantity: 1,
        }
    }
}

impl GenerationParamsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(quantity) = self.quantity {
            if !(GenerationParams::MIN_QUANTITY..=GenerationParams::MAX_QUANTITY)
                .contains(&quantity)
            {
                return Err(format!(
                    "quantity must be between {} and {}, got {}",
                    GenerationParams::MIN_QUANTITY,
                    GenerationParams::MAX_QUANTITY,
                    quantity
                ));
            }
        }
        if let Some(intensity) = self.intensity {
            if intensity > 100 {
                return Err(format!("intensity must be at most 100, got {}", intensity));
            }
        }
        Ok(())
    }
}
