#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that turns Game of Life grids into text, still images
//! or animated GIFs.

mod animation;
mod config;
mod dimensions;
mod input;

use self::{animation::Run, config::LifeConfig, dimensions::GridSize};
use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use life_core::{Grid, Rules, DEFAULT_DEAD_CHAR, DEFAULT_LIVE_CHAR};
use life_rendering::{Color, Palette, RenderStyle, Shading, DEFAULT_BACKGROUND};
use life_system_seeding::{seeded_grid, TextFormat};
use life_system_stepper::GenerationStepper;
use std::{io, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "lifegif",
    version,
    about = "Step Conway's Game of Life and write the generations as text, an image or an animated GIF"
)]
struct Cli {
    /// Output file: .gif for animations, an image such as .png for a single
    /// generation, or `-` to print the generations as text.
    output: String,

    /// Read the starting grid from a plain-text file instead of standard input.
    #[arg(short = 'f', long = "filein", value_name = "FILE", conflicts_with = "random")]
    filein: Option<PathBuf>,

    /// Start from a random grid of the given size.
    #[arg(short = 'r', long, value_name = "ROWSxCOLS")]
    random: Option<GridSize>,

    /// Seed for the random grid; a fresh seed is drawn and logged when omitted.
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Character standing for a live cell in text input and output [default: @].
    #[arg(short = 'L', long = "live-char", value_name = "CHAR")]
    live_char: Option<char>,

    /// Character standing for a dead cell in text input and output [default: .].
    #[arg(short = 'D', long = "dead-char", value_name = "CHAR")]
    dead_char: Option<char>,

    /// Number of generations to write, the starting grid included.
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    generations: u32,

    /// Colour live cells by their number of live neighbors.
    #[arg(short = 'c', long)]
    colored: bool,

    /// Nine hex colours C0..C8 where Cn paints a live cell with n live neighbors.
    #[arg(short = 'C', long, num_args = 9, value_name = "HEX")]
    colors: Option<Vec<Color>>,

    /// Use the greyscale palette for coloured output.
    #[arg(short = 'g', long, conflicts_with = "colors")]
    greyscale: bool,

    /// Hex background colour of coloured output [default: #320000].
    #[arg(short = 'b', long, value_name = "HEX")]
    bgcolor: Option<Color>,

    /// Edge length in pixels of each cell [default: 1].
    #[arg(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    scale: Option<u32>,

    /// Grow the grid where births would fall outside it instead of wrapping edges.
    #[arg(short = 'e', long)]
    auto_expand: bool,

    /// Birth and survival counts in B/S notation [default: B3/S23].
    #[arg(long, value_name = "RULE")]
    rules: Option<Rules>,

    /// TOML configuration file; command-line flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only log warnings and errors.
    #[arg(short = 'q', long)]
    quiet: bool,
}

/// Destination selected by the positional output argument.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Output {
    Text,
    Gif(PathBuf),
    Image(PathBuf),
}

impl Output {
    /// Picks the destination from the file extension. Anything but a GIF can
    /// only hold the starting grid.
    fn from_arg(argument: &str, generations: u32) -> Result<Self> {
        if argument == "-" {
            return Ok(Self::Text);
        }

        let path = PathBuf::from(argument);
        let is_gif = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("gif"));
        if is_gif {
            return Ok(Self::Gif(path));
        }
        ensure!(
            generations == 1,
            "output '{argument}' must be a .gif file to hold {generations} generations"
        );
        if !life_rendering_image::supports(&path) {
            bail!(
                "output '{argument}' must be an image file such as .gif or .png, \
                 or '-' to print text"
            );
        }
        Ok(Self::Image(path))
    }
}

/// Entry point for the Life command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);
    run(cli)
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let output = Output::from_arg(&cli.output, cli.generations)?;
    let config = match &cli.config {
        Some(path) => LifeConfig::load(path)?,
        None => LifeConfig::default(),
    };

    let format = text_format(&cli, &config)?;
    let seed = initial_grid(&cli, &format)?;
    let rules = cli.rules.or(config.rules).unwrap_or_default();
    info!(
        width = seed.width(),
        height = seed.height(),
        population = seed.population(),
        %rules,
        "starting grid ready"
    );

    let run = Run {
        stepper: GenerationStepper::new(rules),
        generations: cli.generations as usize,
        auto_expand: cli.auto_expand,
    };

    match output {
        Output::Text => {
            let stdout = io::stdout();
            run.write_text(seed, &format, &mut stdout.lock())
                .context("failed to print generations")
        }
        Output::Gif(path) => {
            let style = render_style(&cli, &config)?;
            run.write_gif(seed, &style, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "animation written");
            Ok(())
        }
        Output::Image(path) => {
            let style = render_style(&cli, &config)?;
            run.write_image(seed, &style, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "image written");
            Ok(())
        }
    }
}

fn text_format(cli: &Cli, config: &LifeConfig) -> Result<TextFormat> {
    let live = cli
        .live_char
        .or(config.input.live)
        .unwrap_or(DEFAULT_LIVE_CHAR);
    let dead = cli
        .dead_char
        .or(config.input.dead)
        .unwrap_or(DEFAULT_DEAD_CHAR);
    ensure!(
        live != dead,
        "live and dead cells must use different characters (both are '{live}')"
    );
    Ok(TextFormat::new(live, dead))
}

fn initial_grid(cli: &Cli, format: &TextFormat) -> Result<Grid> {
    if let Some(size) = cli.random {
        let seed = cli.seed.unwrap_or_else(rand::random);
        info!(rows = size.rows, columns = size.columns, seed, "generating random grid");
        return Ok(seeded_grid(size.rows, size.columns, seed));
    }

    let text = match &cli.filein {
        Some(path) => input::read_file(path)?,
        None => input::read_stdin(format, !cli.quiet)?,
    };
    format
        .parse(&text)
        .context("the starting grid must be rectangular")
}

fn render_style(cli: &Cli, config: &LifeConfig) -> Result<RenderStyle> {
    let scale = cli.scale.or(config.render.scale).unwrap_or(1);
    let colored = cli.colored || config.render.colored.unwrap_or(false);

    let shading = if colored {
        let palette = match (&cli.colors, cli.greyscale) {
            (Some(colors), _) => Palette::Custom(colors.clone()),
            (None, true) => Palette::Greyscale,
            (None, false) => config.render.palette.clone().unwrap_or_default(),
        };
        let background = cli
            .bgcolor
            .or(config.render.background)
            .unwrap_or(DEFAULT_BACKGROUND);
        Shading::Colored {
            palette,
            background,
        }
    } else {
        if cli.colors.is_some() || cli.greyscale || cli.bgcolor.is_some() {
            warn!("colour options have no effect without --colored");
        }
        Shading::Monochrome
    };

    Ok(RenderStyle::new(scale, shading)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(arguments: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lifegif").chain(arguments.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_follows_the_extension() {
        assert_eq!(Output::from_arg("-", 4).expect("dash"), Output::Text);
        assert_eq!(
            Output::from_arg("out/Glider.GIF", 4).expect("gif"),
            Output::Gif(PathBuf::from("out/Glider.GIF"))
        );
        assert_eq!(
            Output::from_arg("glider.png", 1).expect("single image"),
            Output::Image(PathBuf::from("glider.png"))
        );
        assert!(Output::from_arg("glider", 1).is_err());
        assert!(Output::from_arg("glider.txt", 1).is_err());
    }

    #[test]
    fn animations_require_gif_output() {
        let message = Output::from_arg("glider.png", 2)
            .expect_err("two generations")
            .to_string();

        assert!(message.contains(".gif"), "unexpected error: {message}");
    }

    #[test]
    fn generations_must_be_positive() {
        let arguments = ["lifegif", "-n", "0", "out.gif"];
        assert!(Cli::try_parse_from(arguments).is_err());
    }

    #[test]
    fn characters_must_be_single() {
        let arguments = ["lifegif", "-L", "ab", "out.gif"];
        assert!(Cli::try_parse_from(arguments).is_err());
    }

    #[test]
    fn colour_list_takes_nine_values() {
        let cli = parse(&[
            "-c", "-C", "000000", "111111", "222222", "333333", "444444", "555555", "666666",
            "777777", "888888", "out.gif",
        ]);
        assert_eq!(cli.colors.as_ref().map(Vec::len), Some(9));

        let style = render_style(&cli, &LifeConfig::default()).expect("valid style");
        let Shading::Colored { palette, .. } = style.shading() else {
            panic!("expected coloured shading");
        };
        assert_eq!(palette.colors()[8], Color::from_rgb(0x88, 0x88, 0x88));
    }

    #[test]
    fn flags_override_configuration() {
        let config: LifeConfig = toml::from_str(
            "[render]\nscale = 3\ncolored = true\npalette = \"greyscale\"\n[input]\nlive = \"O\"\n",
        )
        .expect("valid configuration");
        let cli = parse(&["-s", "5", "-L", "#", "out.gif"]);

        let style = render_style(&cli, &config).expect("valid style");
        assert_eq!(style.scale(), 5);
        assert_eq!(
            style.shading(),
            &Shading::Colored {
                palette: Palette::Greyscale,
                background: DEFAULT_BACKGROUND,
            }
        );
        assert_eq!(text_format(&cli, &config).expect("distinct chars").live(), '#');
    }

    #[test]
    fn colour_flags_without_colored_stay_monochrome() {
        let cli = parse(&["-g", "-b", "#ffffff", "out.gif"]);

        let style = render_style(&cli, &LifeConfig::default()).expect("valid style");
        assert_eq!(style.shading(), &Shading::Monochrome);
    }

    #[test]
    fn identical_live_and_dead_characters_are_rejected() {
        let cli = parse(&["-L", ".", "-"]);

        assert!(text_format(&cli, &LifeConfig::default()).is_err());
    }

    #[test]
    fn seeded_random_grid_is_reproducible() {
        let cli = parse(&["-r", "6x9", "--seed", "11", "-"]);
        let format = TextFormat::default();

        let first = initial_grid(&cli, &format).expect("random grid");
        let second = initial_grid(&cli, &format).expect("random grid");
        assert_eq!(first, second);
        assert_eq!((first.width(), first.height()), (9, 6));
    }

    #[test]
    fn rules_flag_parses_notation() {
        let cli = parse(&["--rules", "B36/S23", "-"]);

        assert_eq!(cli.rules.map(|rules| rules.to_string()), Some("B36/S23".to_owned()));
    }
}
