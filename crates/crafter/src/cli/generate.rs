//! The `generate` subcommand: create a batch, watch it settle, write the
//! results.

use super::GenerateArgs;
use crafter::config::CrafterConfig;
use crafter::{
    AvatarStyle, Background, BatchOrchestrator, BuilderError, Clothing, ConfigError,
    CrafterResult, FileSystemHistory, GeminiTransformer, GenerationParams, ImageData, TaskStatus,
};
use std::path::Path;
use std::sync::Arc;
use strum::IntoEnumIterator;

pub async fn run_generate(args: GenerateArgs) -> CrafterResult<()> {
    let config = CrafterConfig::load()?;

    let transformer = GeminiTransformer::new()?
        .with_model(&config.transform.model)
        .with_endpoint(&config.transform.endpoint);
    let history = FileSystemHistory::new(config.history_dir())?;

    let bytes = tokio::fs::read(&args.image).await.map_err(|e| {
        ConfigError::new(format!("Failed to read {}: {}", args.image.display(), e))
    })?;
    let image = ImageData::from_bytes(mime_for_extension(&args.image), &bytes);

    let params = build_params(&args)?;
    let quantity = params.quantity;

    let orchestrator = BatchOrchestrator::new(Arc::new(transformer), Arc::new(history));
    let mut updates = orchestrator.subscribe();
    let batch_id = orchestrator.create_batch(image, params);
    println!("batch {} started ({} pieces)", batch_id, quantity);

    // Render each task by its own status until the whole batch settles.
    let mut last = vec![TaskStatus::Idle; quantity];
    let snapshot = loop {
        if updates.changed().await.is_err() {
            return Err(ConfigError::new("Orchestrator stopped unexpectedly").into());
        }
        let snapshot = updates.borrow_and_update().clone();
        let Some(batch) = snapshot.batch(batch_id) else {
            continue;
        };

        for (index, task) in batch.tasks().iter().enumerate() {
            let status = task.status();
            if status != last[index] {
                match status {
                    TaskStatus::Loading => {
                        println!("piece {}/{}: generating...", index + 1, quantity);
                    }
                    TaskStatus::Success => println!("piece {}/{}: done", index + 1, quantity),
                    TaskStatus::Error => println!(
                        "piece {}/{}: failed - {}",
                        index + 1,
                        quantity,
                        task.error().unwrap_or("unknown error")
                    ),
                    TaskStatus::Idle => {}
                }
                last[index] = status;
            }
        }

        if batch.is_settled() {
            break snapshot;
        }
    };

    let batch = snapshot
        .batch(batch_id)
        .ok_or_else(|| ConfigError::new("Batch vanished from orchestrator state"))?;

    tokio::fs::create_dir_all(&args.out).await.map_err(|e| {
        ConfigError::new(format!("Failed to create {}: {}", args.out.display(), e))
    })?;

    let mut series_announced = false;
    for (index, task) in batch.tasks().iter().enumerate() {
        let Some(art) = task.result() else { continue };

        if !series_announced {
            println!("series: {} - {}", art.theme, art.description);
            series_announced = true;
        }

        let decoded = art.image.decode().map_err(|e| {
            ConfigError::new(format!("Failed to decode generated image: {}", e))
        })?;
        let path = args.out.join(format!(
            "avatar-{}-{}.{}",
            batch_id,
            index + 1,
            extension_for_mime(&art.image.mime)
        ));
        tokio::fs::write(&path, decoded).await.map_err(|e| {
            ConfigError::new(format!("Failed to write {}: {}", path.display(), e))
        })?;
        println!("wrote {}", path.display());
    }

    println!(
        "{} of {} pieces succeeded",
        batch.success_count(),
        batch.tasks().len()
    );
    if let Some(advisory) = batch.advisory() {
        println!("{}", advisory);
    }

    Ok(())
}

fn build_params(args: &GenerateArgs) -> CrafterResult<GenerationParams> {
    GenerationParams::builder()
        .style(parse_option::<AvatarStyle>(&args.style, "style")?)
        .accessory(parse_option(&args.accessory, "accessory")?)
        .clothing(parse_option::<Clothing>(&args.clothing, "clothing")?)
        .background(parse_option::<Background>(&args.background, "background")?)
        .intensity(args.intensity)
        .theme(args.theme.clone())
        .is_random(args.random)
        .randomize_theme(args.random_theme)
        .quantity(args.quantity)
        .build()
        .map_err(|e| BuilderError::from(e.to_string()).into())
}

/// Parse one enumerated option, listing the accepted values on failure.
fn parse_option<T>(value: &str, what: &str) -> CrafterResult<T>
where
    T: IntoEnumIterator + std::str::FromStr + std::fmt::Display,
{
    value.parse::<T>().map_err(|_| {
        let options = T::iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        ConfigError::new(format!(
            "Unknown {} '{}'. Options: {}",
            what, value, options
        ))
        .into()
    })
}

fn mime_for_extension(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
}

fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}
