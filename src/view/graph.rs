use super::{DisplayStatus, Subsystem, SubsystemView};
use crate::wire::{PackageStatus, TelemetrySnapshot};

/// Fixed topology: `(edge id, source, target)`.
///
/// Power feeds the main bus, which feeds every other subsystem.
pub const TOPOLOGY: [(&str, Subsystem, Subsystem); 5] = [
    ("power-bus", Subsystem::Power, Subsystem::MainBus),
    ("bus-propulsion", Subsystem::MainBus, Subsystem::Propulsion),
    ("bus-hull", Subsystem::MainBus, Subsystem::Hull),
    ("bus-manipulator", Subsystem::MainBus, Subsystem::Manipulator),
    ("bus-science", Subsystem::MainBus, Subsystem::SciencePackage),
];

pub type GraphNode = SubsystemView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub id: &'static str,
    pub source: Subsystem,
    pub target: Subsystem,
    /// Taken from the source node's status
    pub color: &'static str,
    pub animated: bool,
}

/// Rendered system overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl SystemGraph {
    /// Project the topology onto `snapshot`.
    ///
    /// A jettisoned science package is gone from the vehicle, so its node and
    /// incident edge are left out.
    pub fn project(snapshot: &TelemetrySnapshot) -> Self {
        let jettisoned = snapshot.rov_state.science_package.status == PackageStatus::Jettisoned;
        let shown = |subsystem: Subsystem| !(jettisoned && subsystem == Subsystem::SciencePackage);

        let nodes: Vec<GraphNode> = Subsystem::ALL
            .into_iter()
            .filter(|subsystem| shown(*subsystem))
            .map(|subsystem| SubsystemView::derive(subsystem, snapshot))
            .collect();

        let edges = TOPOLOGY
            .iter()
            .filter(|(_, source, target)| shown(*source) && shown(*target))
            .map(|(id, source, target)| {
                let status = nodes
                    .iter()
                    .find(|node| node.subsystem == *source)
                    .map(|node| node.status)
                    .unwrap_or(DisplayStatus::Default);
                GraphEdge {
                    id,
                    source: *source,
                    target: *target,
                    color: status.edge_color(),
                    animated: false,
                }
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn node(&self, subsystem: Subsystem) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.subsystem == subsystem)
    }

    pub fn contains(&self, subsystem: Subsystem) -> bool {
        self.node(subsystem).is_some()
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|edge| edge.id == id)
    }
}
