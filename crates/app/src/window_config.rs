//! Window configuration for the viewer and the editor.

use macroquad::window::Conf;

use crate::APP_NAME;
use crate::editor_loop::CELL_PIXELS;

const VIEWER_WINDOW_WIDTH: i32 = 1024;
const VIEWER_WINDOW_HEIGHT: i32 = 768;

pub fn build_window_conf(title: &str, width: i32, height: i32) -> Conf {
    Conf {
        window_title: title.to_owned(),
        window_width: width,
        window_height: height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

pub fn viewer_window_conf() -> Conf {
    build_window_conf(APP_NAME, VIEWER_WINDOW_WIDTH, VIEWER_WINDOW_HEIGHT)
}

/// Sized so a default 24x24 grid fits at one cell per 32 pixels.
pub fn editor_window_conf(cols: usize, rows: usize) -> Conf {
    let side = CELL_PIXELS as usize;
    let width = i32::try_from(cols.saturating_mul(side)).unwrap_or(i32::MAX);
    let height = i32::try_from(rows.saturating_mul(side)).unwrap_or(i32::MAX);
    build_window_conf("Map Editor", width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_are_resizable_and_high_dpi() {
        let conf = viewer_window_conf();
        assert!(conf.high_dpi);
        assert!(conf.window_resizable);
        assert_eq!((conf.window_width, conf.window_height), (1024, 768));
    }

    #[test]
    fn editor_window_fits_the_grid() {
        let conf = editor_window_conf(24, 24);
        assert_eq!((conf.window_width, conf.window_height), (768, 768));
        assert_eq!(conf.window_title, "Map Editor");
    }
}
