//! Software-in-the-loop simulator board

use waf_boards_core::{board, BoardClass, BoardRegistry};

/// Register the `sitl` board
pub fn register(registry: &mut BoardRegistry) -> BoardClass {
    board!(registry, fn sitl(board) {
        board.defines.add([
            ("CONFIG_HAL_BOARD", "HAL_BOARD_SITL"),
            ("CONFIG_HAL_BOARD_SUBTYPE", "HAL_BOARD_SUBTYPE_NONE"),
        ]);
        board.cxxflags.add(["-O3"]);
        board.lib.add(["m"]);
        board.ap_libraries.add(["AP_HAL_SITL", "SITL"]);

        // the simulator's timer code needs the windows multimedia library
        if cfg!(windows) {
            board.lib.add(["winmm"]);
        }
    })
}
