use super::*;
use crate::grid::model::Levels;
use crate::render::style::Palette;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn checkerboard() -> Grid {
    Grid::from_rows(Levels::Binary, &[[1u8, 0, 1], [0, 1, 0], [1, 0, 1]]).unwrap()
}

fn center(frame: &FrameRGBA, row: u32, col: u32, cell: u32) -> [u8; 4] {
    frame
        .pixel(col * cell + cell / 2, row * cell + cell / 2)
        .unwrap()
}

#[test]
fn reveal_order_skips_blank_cells() {
    let g = Grid::from_rows(Levels::Ternary, &[[0u8, 2], [1, 0]]).unwrap();
    let order = RevealOrder::new(&g);
    assert_eq!(order.len(), 2);
    assert_eq!(
        order.revealed(10),
        &[
            RevealCell {
                row: 0,
                col: 1,
                value: 2
            },
            RevealCell {
                row: 1,
                col: 0,
                value: 1
            },
        ]
    );
    assert!(order.revealed(0).is_empty());
    assert_eq!(order.revealed(1).len(), 1);
}

#[test]
fn frame_size_is_cols_by_rows_times_cell() {
    let g = Grid::from_rows(Levels::Binary, &[[1u8, 0, 1, 0], [0, 0, 0, 0]]).unwrap();
    let frame = render(&g, 0, 32).unwrap();
    assert_eq!((frame.width, frame.height), (128, 64));
    assert_eq!(frame.data.len(), 128 * 64 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn only_the_first_threshold_active_cells_are_filled() {
    let g = checkerboard();
    let fill = Palette::default().fill.to_rgba8();
    let frame = render(&g, 2, 32).unwrap();

    assert_eq!(center(&frame, 0, 0, 32), fill);
    assert_eq!(center(&frame, 0, 2, 32), fill);
    assert_eq!(center(&frame, 1, 1, 32), WHITE);
    assert_eq!(center(&frame, 2, 0, 32), WHITE);
    // Blank cells stay blank at any threshold.
    assert_eq!(center(&frame, 0, 1, 32), WHITE);

    let full = render(&g, 5, 32).unwrap();
    for (r, c) in g.active_cells() {
        assert_eq!(center(&full, r as u32, c as u32, 32), fill);
    }
    assert_eq!(center(&full, 1, 0, 32), WHITE);
}

#[test]
fn ternary_levels_use_their_own_colors() {
    let g = Grid::from_rows(Levels::Ternary, &[[1u8, 2, 0]]).unwrap();
    let p = Palette::default();
    let frame = render(&g, 2, 20).unwrap();
    assert_eq!(center(&frame, 0, 0, 20), p.mid.to_rgba8());
    assert_eq!(center(&frame, 0, 1, 20), p.dark.to_rgba8());
    assert_eq!(center(&frame, 0, 2, 20), WHITE);
}

#[test]
fn borders_are_thin_inside_blocks_and_thick_on_block_edges() {
    let g = Grid::from_cells(4, 4, Levels::Binary, vec![0; 16]).unwrap();
    let frame = render(&g, 0, 32).unwrap();
    let y = 16;

    // Left edge: thick line centered on x=0, clipped to pixels 0..2.
    assert_eq!(frame.pixel(0, y).unwrap(), BLACK);
    assert_eq!(frame.pixel(1, y).unwrap(), BLACK);
    assert_eq!(frame.pixel(2, y).unwrap(), WHITE);

    // Thin line at x=32 covers one pixel.
    assert_eq!(frame.pixel(31, y).unwrap(), WHITE);
    assert_eq!(frame.pixel(32, y).unwrap(), BLACK);
    assert_eq!(frame.pixel(33, y).unwrap(), WHITE);

    // Thick line at x=96 spans 95..98.
    assert_eq!(frame.pixel(94, y).unwrap(), WHITE);
    assert_eq!(frame.pixel(95, y).unwrap(), BLACK);
    assert_eq!(frame.pixel(96, y).unwrap(), BLACK);
    assert_eq!(frame.pixel(97, y).unwrap(), BLACK);
    assert_eq!(frame.pixel(98, y).unwrap(), WHITE);

    // Same on the horizontal axis.
    assert_eq!(frame.pixel(16, 32).unwrap(), BLACK);
    assert_eq!(frame.pixel(16, 33).unwrap(), WHITE);
    assert_eq!(frame.pixel(16, 95).unwrap(), BLACK);
}

#[test]
fn all_zero_grid_renders_blank_cells_at_any_threshold() {
    let g = Grid::from_rows(Levels::Binary, &[[0u8, 0], [0, 0]]).unwrap();
    let blank = render(&g, 0, 32).unwrap();
    let later = render(&g, 99, 32).unwrap();
    assert_eq!(blank, later);
    for r in 0..2 {
        for c in 0..2 {
            assert_eq!(center(&blank, r, c, 32), WHITE);
        }
    }
}

#[test]
fn rendering_is_idempotent_across_calls_and_renderers() {
    let g = checkerboard();
    let order = RevealOrder::new(&g);
    let mut r = GridRenderer::new(RenderStyle::with_cell_size(32)).unwrap();
    let a = r.render(&g, &order, 3).unwrap();
    let _ = r.render(&g, &order, 5).unwrap();
    let b = r.render(&g, &order, 3).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, render(&g, 3, 32).unwrap());
}

#[test]
fn renderer_rejects_bad_geometry() {
    assert!(GridRenderer::new(RenderStyle::with_cell_size(0)).is_err());

    let wide = Grid::from_cells(1, 3000, Levels::Binary, vec![0; 3000]).unwrap();
    let r = GridRenderer::new(RenderStyle::with_cell_size(50)).unwrap();
    assert!(matches!(
        r.frame_size(&wide),
        Err(ReelError::InvalidInput(_))
    ));
}
