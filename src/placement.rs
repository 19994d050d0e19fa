//! Where each interactive part sits on the board and which section it
//! opens.

use std::fmt;

use serde::Deserialize;

/// The closed set of board component kinds.
///
/// Both the mesh recipes and the modal dispatcher match on this
/// exhaustively; adding a kind means touching both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComponentType {
    Mcu,
    Vrm,
    Osc,
    Com,
    Mem,
    Uart,
    Cap,
    Led,
    Swd,
}

impl ComponentType {
    pub const ALL: [ComponentType; 9] = [
        ComponentType::Mcu,
        ComponentType::Vrm,
        ComponentType::Osc,
        ComponentType::Com,
        ComponentType::Mem,
        ComponentType::Uart,
        ComponentType::Cap,
        ComponentType::Led,
        ComponentType::Swd,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ComponentType::Mcu => "MCU",
            ComponentType::Vrm => "VRM",
            ComponentType::Osc => "OSC",
            ComponentType::Com => "COM",
            ComponentType::Mem => "MEM",
            ComponentType::Uart => "UART",
            ComponentType::Cap => "CAP",
            ComponentType::Led => "LED",
            ComponentType::Swd => "SWD",
        }
    }

    /// Translation path of the on-board label, e.g. `components.mcu`.
    pub fn label_key(self) -> String {
        format!("components.{}", self.code().to_ascii_lowercase())
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub type PlacementId = &'static str;

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub id: PlacementId,
    pub kind: ComponentType,
    pub label: &'static str,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub color: &'static str,
    pub data_key: &'static str,
}

// MCU in the middle, clock and memory beside it, power in one corner and
// connectors on the edges. Both CAP placements open the workflow record.
pub static PLACEMENTS: [Placement; 10] = [
    Placement {
        id: "mcu",
        kind: ComponentType::Mcu,
        label: "U1 MCU — About Me",
        position: [0.0, 0.08, 0.0],
        rotation: [0.0, 0.0, 0.0],
        scale: [2.5, 1.0, 2.5],
        color: "#2d2d2d",
        data_key: "about",
    },
    Placement {
        id: "osc",
        kind: ComponentType::Osc,
        label: "Y1 OSC — Education",
        position: [3.0, 0.08, -1.5],
        rotation: [0.0, 0.0, 0.0],
        scale: [1.5, 1.5, 1.5],
        color: "#2d1a1a",
        data_key: "education",
    },
    Placement {
        id: "mem",
        kind: ComponentType::Mem,
        label: "U3 MEM — Projects",
        position: [4.0, 0.06, 2.0],
        rotation: [0.0, 0.0, 0.0],
        scale: [2.2, 1.0, 2.2],
        color: "#2d2d1a",
        data_key: "projects",
    },
    Placement {
        id: "com",
        kind: ComponentType::Com,
        label: "U2 COM — Experience",
        position: [-4.0, 0.08, 1.0],
        rotation: [0.0, 0.0, 0.0],
        scale: [1.8, 1.0, 2.0],
        color: "#1a2d1a",
        data_key: "experience",
    },
    Placement {
        id: "vrm",
        kind: ComponentType::Vrm,
        label: "VRM — Skills",
        position: [-5.0, 0.1, -4.0],
        rotation: [0.0, 0.0, 0.0],
        scale: [1.8, 1.0, 1.5],
        color: "#1a1a2e",
        data_key: "skills",
    },
    Placement {
        id: "uart",
        kind: ComponentType::Uart,
        label: "P1 UART — Contact",
        position: [5.0, 0.12, -4.0],
        rotation: [0.0, 0.0, 0.0],
        scale: [1.5, 1.0, 1.5],
        color: "#1a1a1a",
        data_key: "contact",
    },
    Placement {
        id: "cap1",
        kind: ComponentType::Cap,
        label: "C1-C4 CAP — Workflow",
        position: [-3.0, 0.1, 4.0],
        rotation: [0.0, 0.0, 0.0],
        scale: [1.2, 1.0, 1.2],
        color: "#1a1a1a",
        data_key: "workflow",
    },
    Placement {
        id: "cap2",
        kind: ComponentType::Cap,
        label: "C2",
        position: [3.0, 0.1, 5.0],
        rotation: [0.0, 0.0, 0.0],
        scale: [1.2, 1.0, 1.2],
        color: "#1a1a1a",
        data_key: "workflow",
    },
    Placement {
        id: "led",
        kind: ComponentType::Led,
        label: "D1-D3 LED — Languages",
        position: [3.5, 0.06, -5.5],
        rotation: [0.0, 0.0, 0.0],
        scale: [1.5, 1.5, 1.5],
        color: "#1a1a1a",
        data_key: "languages",
    },
    Placement {
        id: "swd",
        kind: ComponentType::Swd,
        label: "J1 SWD — Goals",
        position: [5.5, 0.1, 4.2],
        rotation: [0.0, std::f32::consts::FRAC_PI_2, 0.0],
        scale: [1.5, 1.0, 1.5],
        color: "#1a1a1a",
        data_key: "goals",
    },
];

pub fn find(id: &str) -> Option<&'static Placement> {
    PLACEMENTS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = PLACEMENTS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PLACEMENTS.len());
    }

    #[test]
    fn every_kind_is_placed_at_least_once() {
        for kind in ComponentType::ALL {
            assert!(PLACEMENTS.iter().any(|p| p.kind == kind), "{kind} is never placed");
        }
    }

    #[test]
    fn placements_stay_on_the_board() {
        for p in &PLACEMENTS {
            assert!(p.position[0].abs() < 6.5 && p.position[2].abs() < 6.5, "{} is off the board", p.id);
            assert!(p.scale.iter().all(|s| *s > 0.0));
        }
    }

    #[test]
    fn workflow_is_shared_by_both_caps() {
        let caps: Vec<_> = PLACEMENTS.iter().filter(|p| p.data_key == "workflow").map(|p| p.id).collect();
        assert_eq!(caps, ["cap1", "cap2"]);
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find("mcu").map(|p| p.kind), Some(ComponentType::Mcu));
        assert!(find("u99").is_none());
    }

    #[test]
    fn label_keys_are_lowercase_codes() {
        assert_eq!(ComponentType::Uart.label_key(), "components.uart");
    }
}
