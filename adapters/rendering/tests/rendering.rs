use life_core::{CellState, Grid, WrapPolicy};
use life_rendering::{
    rasterize, Canvas, Color, FrameOrigin, Palette, RenderStyle, RenderingError, Shading,
    DEFAULT_BACKGROUND,
};
use serde::Deserialize;

fn grid_from(text: &str) -> Grid {
    let rows = text
        .lines()
        .map(|line| line.chars().map(|ch| CellState::from(ch == '@')).collect())
        .collect();
    Grid::from_rows(rows).expect("test grids are rectangular")
}

fn colored(scale: u32) -> RenderStyle {
    RenderStyle::new(
        scale,
        Shading::Colored {
            palette: Palette::Default,
            background: DEFAULT_BACKGROUND,
        },
    )
    .expect("valid style")
}

#[test]
fn empty_grid_rasterises_to_empty_image() {
    let raster = rasterize(&Grid::empty(), &colored(4), WrapPolicy::Wrap);

    assert_eq!((raster.width(), raster.height()), (0, 0));
    assert!(raster.pixels().is_empty());
}

#[test]
fn monochrome_cells_become_uniform_blocks() {
    let style = RenderStyle::new(2, Shading::Monochrome).expect("valid style");
    let raster = rasterize(&grid_from("@.\n.."), &style, WrapPolicy::Wrap);

    assert_eq!((raster.width(), raster.height()), (4, 4));
    assert_eq!(raster.pixels().len(), 16);
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        assert_eq!(raster.pixel(x, y), Some(0), "live block at ({x}, {y})");
    }
    for (x, y) in [(2, 0), (3, 1), (0, 2), (3, 3)] {
        assert_eq!(raster.pixel(x, y), Some(1), "dead block at ({x}, {y})");
    }
    assert_eq!(raster.pixel(4, 0), None);
}

#[test]
fn colored_cells_are_indexed_by_neighbor_count() {
    let raster = rasterize(
        &grid_from(".....\n.....\n.@@@.\n.....\n....."),
        &colored(1),
        WrapPolicy::Ignore,
    );

    assert_eq!(raster.pixel(1, 2), Some(2), "end cell has one neighbor");
    assert_eq!(raster.pixel(2, 2), Some(3), "middle cell has two neighbors");
    assert_eq!(raster.pixel(3, 2), Some(2));
    assert_eq!(raster.pixel(2, 1), Some(0), "dead cells use the background");
}

#[test]
fn neighbor_shading_follows_the_wrap_policy() {
    let line = grid_from("@@@");

    let ignored = rasterize(&line, &colored(1), WrapPolicy::Ignore);
    let wrapped = rasterize(&line, &colored(1), WrapPolicy::Wrap);

    assert_eq!(ignored.pixel(1, 0), Some(3));
    assert_eq!(wrapped.pixel(1, 0), Some(9), "a one-row torus sees every alias");
}

#[test]
fn palette_table_and_raster_indices_line_up() {
    let style = colored(1);
    let table = style.color_table();
    let raster = rasterize(&grid_from("@@\n@@"), &style, WrapPolicy::Ignore);

    let index = usize::from(raster.pixel(0, 0).expect("inside the raster"));
    let expected = Palette::Default.colors()[3];
    assert_eq!(
        &table[index * 3..index * 3 + 3],
        &[expected.red(), expected.green(), expected.blue()]
    );
}

#[derive(Debug, Deserialize)]
struct RenderSection {
    palette: Palette,
    background: Color,
}

#[test]
fn named_palettes_deserialise_from_toml() {
    let section: RenderSection =
        toml::from_str("palette = \"Grayscale\"\nbackground = \"#102030\"\n").expect("valid toml");

    assert_eq!(section.palette, Palette::Greyscale);
    assert_eq!(section.background, Color::from_rgb(16, 32, 48));
}

#[test]
fn custom_palettes_deserialise_from_hex_lists() {
    let source = r##"
background = "000000"
palette = ["#000001", "#000002", "#000003", "#000004", "#000005",
           "#000006", "#000007", "#000008", "#000009"]
"##;
    let section: RenderSection = toml::from_str(source).expect("valid toml");

    let Palette::Custom(colors) = &section.palette else {
        panic!("expected a custom palette, found {:?}", section.palette);
    };
    assert_eq!(colors.len(), 9);
    assert_eq!(colors[8], Color::from_rgb(0, 0, 9));
}

#[test]
fn unknown_palette_names_are_rejected() {
    let result: Result<RenderSection, _> =
        toml::from_str("palette = \"neon\"\nbackground = \"#000000\"\n");
    let message = result.expect_err("unknown palette").to_string();

    assert!(message.contains("neon"), "unexpected error: {message}");
}

#[test]
fn custom_palette_length_is_validated() {
    let too_long = Palette::Custom(vec![Color::from_rgb(1, 2, 3); 256]);

    assert_eq!(
        RenderStyle::new(
            1,
            Shading::Colored {
                palette: too_long,
                background: DEFAULT_BACKGROUND,
            },
        ),
        Err(RenderingError::PaletteTooLong { found: 256 })
    );
}

#[test]
fn placed_frames_are_padded_with_the_fill_index() {
    let style = RenderStyle::monochrome();
    let lone = rasterize(&grid_from("@"), &style, WrapPolicy::Wrap);
    let canvas = Canvas {
        width: 3,
        height: 2,
    };

    let placed = lone
        .placed_on(canvas, FrameOrigin { left: 1, top: 1 }, style.background_index())
        .expect("frame fits");

    assert_eq!((placed.width(), placed.height()), (3, 2));
    assert_eq!(placed.pixels(), &[1, 1, 1, 1, 0, 1]);
}

#[test]
fn frames_past_the_canvas_edge_are_rejected() {
    let style = RenderStyle::monochrome();
    let block = rasterize(&grid_from("@@\n@@"), &style, WrapPolicy::Wrap);
    let canvas = Canvas {
        width: 2,
        height: 2,
    };
    let origin = FrameOrigin { left: 1, top: 0 };

    assert_eq!(
        block.placed_on(canvas, origin, 1),
        Err(RenderingError::FrameOutsideCanvas {
            width: 2,
            height: 2,
            origin,
            canvas,
        })
    );
}

#[test]
fn canvas_for_grid_scales_cells() {
    let style = RenderStyle::new(3, Shading::Monochrome).expect("valid style");

    assert_eq!(
        Canvas::for_grid(&grid_from("@..\n..."), &style),
        Canvas {
            width: 9,
            height: 6,
        }
    );
}
