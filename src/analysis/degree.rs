use crate::core::graph::Graph;

pub struct DegreeStats {
    pub in_deg: u32,
    pub out_deg: u32,
}

#[derive(Debug, PartialEq)]
pub struct DegreeSummary {
    pub nodes: usize,
    pub edges: usize,
    pub max_in_degree: u32,
    pub max_out_degree: u32,
    pub isolated: usize,
    pub mean_in_degree: f64,
}

pub fn compute_degree_stats(graph: &Graph) -> Vec<DegreeStats> {
    let mut result = Vec::with_capacity(graph.node_count());
    for node_id in 0..graph.node_count() {
        result.push(DegreeStats {
            in_deg: graph.in_degree(node_id as u32) as u32,
            out_deg: graph.out_degree(node_id as u32) as u32,
        })
    }
    result
}

pub fn summarize(graph: &Graph) -> DegreeSummary {
    let stats = compute_degree_stats(graph);
    let mean_in_degree = if stats.is_empty() {
        0.0
    } else {
        graph.edge_count() as f64 / stats.len() as f64
    };

    DegreeSummary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        max_in_degree: stats.iter().map(|s| s.in_deg).max().unwrap_or(0),
        max_out_degree: stats.iter().map(|s| s.out_deg).max().unwrap_or(0),
        isolated: stats.iter().filter(|s| s.in_deg == 0 && s.out_deg == 0).count(),
        mean_in_degree,
    }
}
