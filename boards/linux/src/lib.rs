//! Board declarations for the Linux HAL.
//!
//! Every board here derives from `linux`, which carries the HAL library and
//! the common defines; the derived boards only select their HAL subtype and,
//! when they are cross compiled, a toolchain.

use waf_boards_core::{board, BoardClass, BoardDef, BoardRegistry};

/// Default cross toolchain for the ARM Linux boards
pub const ARM_TOOLCHAIN: &str = "arm-linux-gnueabihf";

fn subtype(board: &mut BoardDef, subtype: &str) {
    board
        .defines
        .add([("CONFIG_HAL_BOARD_SUBTYPE", format!("HAL_BOARD_SUBTYPE_LINUX_{subtype}"))]);
}

fn arm(board: &mut BoardDef, name: &str) {
    subtype(board, name);
    board.toolchain = Some(ARM_TOOLCHAIN.into());
}

/// Register `linux` and every board derived from it. Returns the `linux`
/// class so other declaration units can derive from it.
pub fn register(registry: &mut BoardRegistry) -> BoardClass {
    let linux = board!(registry, fn linux(board) {
        board.defines.add([
            ("CONFIG_HAL_BOARD", "HAL_BOARD_LINUX"),
            ("CONFIG_HAL_BOARD_SUBTYPE", "HAL_BOARD_SUBTYPE_LINUX_NONE"),
        ]);
        board.cxxflags.add(["-O3"]);
        board.lib.add(["rt"]);
        board.ap_libraries.add(["AP_HAL_Linux"]);
    });

    board!(registry, Some(&linux), fn minlure(board) {
        subtype(board, "MINLURE");
    });

    board!(registry, Some(&linux), fn erleboard(board) {
        arm(board, "ERLEBOARD");
    });

    let navio = board!(registry, Some(&linux), fn navio(board) {
        arm(board, "NAVIO");
    });

    board!(registry, Some(&navio), fn navio2(board) {
        subtype(board, "NAVIO2");
    });

    board!(registry, Some(&linux), fn zynq(board) {
        subtype(board, "ZYNQ");
        board.toolchain = Some("arm-xilinx-linux-gnueabi".into());
    });

    board!(registry, Some(&linux), fn bbbmini(board) {
        arm(board, "BBBMINI");
    });

    board!(registry, Some(&linux), fn blue(board) {
        arm(board, "BLUE");
    });

    let pxf = board!(registry, Some(&linux), fn pxf(board) {
        arm(board, "PXF");
    });

    board!(registry, Some(&pxf), fn pxfmini(board) {
        subtype(board, "PXFMINI");
    });

    board!(registry, Some(&linux), fn bebop(board) {
        arm(board, "BEBOP");
        board.linkflags.add(["-static"]);
    });

    board!(registry, Some(&linux), fn raspilot(board) {
        arm(board, "RASPILOT");
    });

    board!(registry, Some(&linux), fn erlebrain2(board) {
        arm(board, "ERLEBRAIN2");
    });

    board!(registry, Some(&linux), fn bhat(board) {
        arm(board, "BH");
    });

    linux
}

#[cfg(test)]
mod tests {
    use waf_boards_core::ConfigValue;

    use super::*;

    fn registry() -> BoardRegistry {
        let mut registry = BoardRegistry::new();
        register(&mut registry);
        registry
    }

    fn defines(registry: &BoardRegistry, name: &str) -> Vec<String> {
        registry.get_board(name).unwrap()["DEFINES"]
            .as_list()
            .unwrap()
            .to_vec()
    }

    #[test]
    fn registers_family() {
        let registry = registry();
        assert_eq!(
            registry.names(),
            [
                "bbbmini",
                "bebop",
                "bhat",
                "blue",
                "erleboard",
                "erlebrain2",
                "linux",
                "minlure",
                "navio",
                "navio2",
                "pxf",
                "pxfmini",
                "raspilot",
                "zynq",
            ]
        );
    }

    #[test]
    fn derived_board_overrides_subtype() {
        let registry = registry();
        assert_eq!(
            defines(&registry, "linux"),
            [
                "CONFIG_HAL_BOARD=HAL_BOARD_LINUX",
                "CONFIG_HAL_BOARD_SUBTYPE=HAL_BOARD_SUBTYPE_LINUX_NONE",
            ]
        );
        assert_eq!(
            defines(&registry, "navio"),
            [
                "CONFIG_HAL_BOARD=HAL_BOARD_LINUX",
                "CONFIG_HAL_BOARD_SUBTYPE=HAL_BOARD_SUBTYPE_LINUX_NAVIO",
            ]
        );
    }

    #[test]
    fn navio2_inherits_navio_toolchain() {
        let registry = registry();
        let board = registry.get("navio2").unwrap();
        assert_eq!(board.name, "navio2");
        assert_eq!(board.toolchain.as_deref(), Some(ARM_TOOLCHAIN));
        assert_eq!(
            board.defines.get("CONFIG_HAL_BOARD_SUBTYPE"),
            Some("HAL_BOARD_SUBTYPE_LINUX_NAVIO2")
        );
        assert_eq!(*board.ap_libraries, ["AP_HAL_Linux"]);
        assert_eq!(*board.lib, ["rt"]);
        assert_eq!(registry.class("navio2").unwrap().lineage(), ["linux", "navio", "navio2"]);
    }

    #[test]
    fn bebop_links_statically() {
        let dict = registry().get_board("bebop").unwrap();
        assert_eq!(dict["LINKFLAGS"], ConfigValue::List(vec!["-static".into()]));
        assert_eq!(dict["TOOLCHAIN"], ConfigValue::Scalar(ARM_TOOLCHAIN.into()));
    }

    #[test]
    fn native_boards_have_no_toolchain() {
        let registry = registry();
        for name in ["linux", "minlure"] {
            assert!(!registry.get_board(name).unwrap().contains_key("TOOLCHAIN"));
        }
    }
}
