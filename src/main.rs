use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use inkspire::app::{App, SavedImage};
use inkspire::models::{
    BodyPlacement, ColorScheme, Config, GenerationRequest, MockupSettings, TattooStyle,
    DEFAULT_SIZE,
};
use inkspire::{prompts, styles};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "inkspire")]
#[command(about = "Generate tattoo designs and photorealistic placement mockups")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a flat 2D design, optionally followed by its mockup.
    Design {
        #[command(flatten)]
        design: DesignArgs,
        /// Also render the design on the chosen body part.
        #[arg(long)]
        mockup: bool,
    },
    /// Render a mockup for an existing design image.
    Mockup {
        /// Path to the design image (PNG, JPEG or WebP).
        #[arg(long, value_name = "FILE")]
        design: PathBuf,
        #[arg(long, value_enum, default_value_t = TattooStyle::default())]
        style: TattooStyle,
        #[command(flatten)]
        placement: PlacementArgs,
    },
    /// List the available tattoo styles.
    Styles,
    /// Print the design prompt without calling the image service.
    Prompt {
        #[command(flatten)]
        design: DesignArgs,
    },
}

#[derive(Debug, Args)]
struct DesignArgs {
    /// What to draw. Quote words ("like this") to have them lettered verbatim.
    #[arg(long)]
    subject: String,
    #[arg(long, value_enum, default_value_t = TattooStyle::default())]
    style: TattooStyle,
    #[arg(long, value_enum, default_value_t = ColorScheme::default())]
    colors: ColorScheme,
    #[command(flatten)]
    placement: PlacementArgs,
    /// Extra free-text guidance for the artwork.
    #[arg(long)]
    details: Option<String>,
}

#[derive(Debug, Args)]
struct PlacementArgs {
    #[arg(long, value_enum, default_value_t = BodyPlacement::default())]
    placement: BodyPlacement,
    /// Refinement such as "inner wrist".
    #[arg(long)]
    placement_detail: Option<String>,
    /// Real-world size, e.g. "10 cm".
    #[arg(long, default_value = DEFAULT_SIZE)]
    size: String,
}

impl PlacementArgs {
    fn into_settings(self) -> MockupSettings {
        MockupSettings {
            placement: self.placement,
            placement_detail: self.placement_detail,
            size: self.size,
        }
    }
}

impl DesignArgs {
    fn into_request(self) -> GenerationRequest {
        GenerationRequest {
            subject: self.subject,
            style: self.style,
            color_scheme: self.colors,
            placement: self.placement.placement,
            placement_detail: self.placement.placement_detail,
            size: self.placement.size,
            additional_details: self.details,
        }
    }
}

fn print_styles() {
    for definition in styles::catalog() {
        println!("{}", definition.name);
        println!("  {}", definition.description);
        println!("  Traits: {}", definition.traits.join(", "));
        println!();
    }
}

fn report(saved: &SavedImage) {
    if let Some(path) = &saved.design_path {
        println!("design: {}", path.display());
    }
    if let Some(path) = &saved.mockup_path {
        println!("mockup: {}", path.display());
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Styles => print_styles(),
        Command::Prompt { design } => {
            let request = design.into_request();
            request.validate()?;
            println!("{}", prompts::design_prompt(&request));
        }
        Command::Design { design, mockup } => {
            let request = design.into_request();
            request.validate()?;
            let app = App::from_config(&Config::from_env()?)?;
            let saved = app.design(&request, mockup).await?;
            report(&saved);
        }
        Command::Mockup {
            design,
            style,
            placement,
        } => {
            let app = App::from_config(&Config::from_env()?)?;
            let saved = app
                .mockup_from_file(&design, style, placement.into_settings())
                .await?;
            report(&saved);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkspire=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match run(args.command).await {
        Ok(()) => {
            info!("Done");
            Ok(())
        }
        Err(e) => {
            error!("Failed: {}", e);
            std::process::exit(1);
        }
    }
}
