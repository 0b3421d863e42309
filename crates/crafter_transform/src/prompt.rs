//! Prompt construction for avatar generation requests.

use crafter_core::{Accessory, AvatarStyle, Clothing, GenerationParams};

/// Build the generation prompt for one piece of a batch.
///
/// The prompt fixes the visual frame (style, background), layers in the
/// accessory/clothing detail context and the optional creative theme, and
/// closes with an instruction demanding exactly two labelled text lines
/// (`Theme:` and `Description:`) that the response parser extracts.
pub fn build_prompt(params: &GenerationParams, index: usize, total: usize) -> String {
    let theme_context = if params.randomize_theme {
        "Creative freedom: random theme mode is on. Invent a completely unique and unexpected \
         creative theme (for example: space opera, cyberpunk, ancient mythology, steampunk) and \
         redesign all visual elements around it."
            .to_string()
    } else if let Some(theme) = params.theme_text() {
        format!(
            "Creative theme: \"{}\". Be inventive and make every visual element serve the theme.",
            theme
        )
    } else {
        String::new()
    };

    let style_instruction = style_instruction(params.style);
    let detail_context = detail_context(params);

    let series_context = if total > 1 {
        format!(
            "This is piece {} of a series of {}. Keep the series cohesive but give each piece \
             its own distinct design.",
            index + 1,
            total
        )
    } else {
        String::new()
    };

    format!(
        "Transform the character in the attached image into a high-quality collectible avatar.\n\
         \n\
         Fixed visual frame (must be followed exactly):\n\
         - Material style: {style}\n\
         - Scene background: {background}\n\
         \n\
         {detail_context}\n\
         \n\
         {theme_context}\n\
         \n\
         {series_context}\n\
         \n\
         Instructions:\n\
         1. Preserve the character's core identity (species, key facial features, primary color \
         scheme).\n\
         2. The overall look must match the selected style: {style}.\n\
         3. {style_instruction}\n\
         4. Render a centered portrait, high resolution, with the polish of a collectible \
         digital artwork.\n\
         5. Transformation intensity (creative freedom): {intensity}/100.\n\
         \n\
         Critical requirement: in the text portion of your reply, provide exactly these two \
         lines and nothing else:\n\
         Theme: [a short, punchy theme name for this series]\n\
         Description: [one sentence describing the design concept and its highlights]",
        style = params.style.label(),
        background = params.background.label(),
        detail_context = detail_context,
        theme_context = theme_context,
        series_context = series_context,
        style_instruction = style_instruction,
        intensity = params.effective_intensity(),
    )
}

fn style_instruction(style: AvatarStyle) -> &'static str {
    if style.is_three_dimensional() {
        "Apply high-quality 3D rendering with soft shadows, professional studio lighting and a \
         tangible material feel (clay, plastic or metal)."
    } else if style == AvatarStyle::RetroDithered {
        "Apply a retro 1-bit dithered halftone aesthetic: very high contrast mono or duotone, \
         shading expressed through dithering, evoking an early Macintosh or Game Boy screen."
    } else {
        "Apply a high-quality 2D art treatment, tuning linework, palette and brushwork to the \
         selected style so it reads as distinctive flat artwork."
    }
}

fn detail_context(params: &GenerationParams) -> String {
    if params.is_random {
        "Random detail mode is on: invent highly creative accessory and clothing details for \
         the character."
            .to_string()
    } else {
        let accessory = match params.accessory {
            Accessory::None => "none (keep the original look, add no extra accessories)".to_string(),
            other => other.label().to_string(),
        };
        let clothing = match params.clothing {
            Clothing::None => "none (keep the outfit already present in the image)".to_string(),
            other => other.label().to_string(),
        };
        format!(
            "Specific requirements - accessory: {}. Clothing: {}.",
            accessory, clothing
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crafter_core::Background;

    #[test]
    fn prompt_carries_style_and_background_labels() {
        let params = GenerationParams::builder()
            .style(AvatarStyle::PixelArt)
            .background(Background::SpaceNebula)
            .build()
            .unwrap();
        let prompt = build_prompt(&params, 0, 1);
        assert!(prompt.contains("retro 8-bit pixel art"));
        assert!(prompt.contains("deep-space nebula"));
    }

    #[test]
    fn explicit_theme_appears_verbatim() {
        let params = GenerationParams::builder()
            .theme(Some("ancient mythology".to_string()))
            .build()
            .unwrap();
        let prompt = build_prompt(&params, 0, 1);
        assert!(prompt.contains("Creative theme: \"ancient mythology\""));
    }

    #[test]
    fn randomized_theme_replaces_explicit_theme() {
        let params = GenerationParams::builder()
            .theme(Some("ignored".to_string()))
            .randomize_theme(true)
            .build()
            .unwrap();
        let prompt = build_prompt(&params, 0, 1);
        assert!(prompt.contains("random theme mode is on"));
        assert!(!prompt.contains("Creative theme: \"ignored\""));
    }

    #[test]
    fn none_selections_keep_the_original() {
        let params = GenerationParams::builder()
            .accessory(Accessory::None)
            .clothing(Clothing::None)
            .build()
            .unwrap();
        let prompt = build_prompt(&params, 0, 1);
        assert!(prompt.contains("add no extra accessories"));
        assert!(prompt.contains("keep the outfit already present"));
    }

    #[test]
    fn random_mode_pins_intensity_to_85() {
        let params = GenerationParams::builder()
            .intensity(10)
            .is_random(true)
            .build()
            .unwrap();
        let prompt = build_prompt(&params, 0, 1);
        assert!(prompt.contains("85/100"));
        assert!(prompt.contains("Random detail mode is on"));
    }

    #[test]
    fn series_context_only_for_multi_piece_batches() {
        let params = GenerationParams::builder().quantity(3).build().unwrap();
        let prompt = build_prompt(&params, 1, 3);
        assert!(prompt.contains("piece 2 of a series of 3"));

        let single = GenerationParams::builder().build().unwrap();
        assert!(!build_prompt(&single, 0, 1).contains("series of"));
    }

    #[test]
    fn retro_dithered_gets_its_own_instruction() {
        let params = GenerationParams::builder()
            .style(AvatarStyle::RetroDithered)
            .build()
            .unwrap();
        let prompt = build_prompt(&params, 0, 1);
        assert!(prompt.contains("1-bit dithered halftone"));
    }
}
