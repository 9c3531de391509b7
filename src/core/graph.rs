use crate::core::ids::NodeId;
use chrono::{DateTime, Utc};

pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new(node_count: usize) -> Self {
        Self {
            graph: Graph::new(node_count),
        }
    }

    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, quality: f64, last_seen: DateTime<Utc>) {
        self.graph.srcs_out.push(src);
        self.graph.dsts.push(dst);
        self.graph.quality_out.push(quality);
        self.graph.last_seen_out.push(last_seen);
    }

    pub fn freeze(mut self) -> Graph {
        let edge_count = self.graph.edge_count();
        if edge_count == 0 {
            return self.graph;
        }

        let mut buf = vec![0; self.graph.node_count];

        // in-degree per dst node
        for dst in &self.graph.dsts {
            buf[*dst as usize] += 1;
        }
        prefix_offsets(&buf, &mut self.graph.offsets_in);

        buf.fill(0);
        self.graph.srcs_in = vec![0; edge_count];
        self.graph.quality_in = vec![0.0; edge_count];
        self.graph.last_seen_in = vec![DateTime::<Utc>::UNIX_EPOCH; edge_count];
        for e in 0..edge_count {
            let dst = self.graph.dsts[e] as usize;
            let idx = self.graph.offsets_in[dst] + buf[dst];
            self.graph.srcs_in[idx] = self.graph.srcs_out[e];
            self.graph.quality_in[idx] = self.graph.quality_out[e];
            self.graph.last_seen_in[idx] = self.graph.last_seen_out[e];
            buf[dst] += 1;
        }

        buf.fill(0);
        // out-degree per src node
        for src in &self.graph.srcs_out {
            buf[*src as usize] += 1;
        }
        prefix_offsets(&buf, &mut self.graph.offsets_out);

        buf.fill(0);
        let mut dsts = vec![0; edge_count];
        let mut quality = vec![0.0; edge_count];
        let mut last_seen = vec![DateTime::<Utc>::UNIX_EPOCH; edge_count];
        let mut srcs = vec![0; edge_count];
        for e in 0..edge_count {
            let src = self.graph.srcs_out[e] as usize;
            let idx = self.graph.offsets_out[src] + buf[src];
            srcs[idx] = self.graph.srcs_out[e];
            dsts[idx] = self.graph.dsts[e];
            quality[idx] = self.graph.quality_out[e];
            last_seen[idx] = self.graph.last_seen_out[e];
            buf[src] += 1;
        }
        self.graph.srcs_out = srcs;
        self.graph.dsts = dsts;
        self.graph.quality_out = quality;
        self.graph.last_seen_out = last_seen;

        self.graph
    }
}

fn prefix_offsets(counts: &[usize], offsets: &mut [usize]) {
    let mut next = 0;
    for (i, edges) in counts.iter().enumerate() {
        offsets[i] = next;
        next += edges;
        offsets[i + 1] = next;
    }
}

pub struct Graph {
    node_count: usize,
    srcs_out: Vec<NodeId>,
    srcs_in: Vec<NodeId>,
    dsts: Vec<NodeId>,
    quality_out: Vec<f64>,
    quality_in: Vec<f64>,
    last_seen_out: Vec<DateTime<Utc>>,
    last_seen_in: Vec<DateTime<Utc>>,
    offsets_out: Vec<usize>,
    offsets_in: Vec<usize>,
}

impl Graph {
    fn new(node_count: usize) -> Self {
        Self {
            node_count,
            srcs_out: vec![],
            srcs_in: vec![],
            dsts: vec![],
            quality_out: vec![],
            quality_in: vec![],
            last_seen_out: vec![],
            last_seen_in: vec![],
            offsets_out: vec![0; node_count + 1],
            offsets_in: vec![0; node_count + 1],
        }
    }

    pub fn edge_count(&self) -> usize {
        self.srcs_out.len()
    }

    pub fn edges_from(&'_ self, src: NodeId) -> OutgoingEdgeIter<'_> {
        OutgoingEdgeIter::new(self, src)
    }

    pub fn edges_to(&'_ self, dst: NodeId) -> IncomingEdgeIter<'_> {
        IncomingEdgeIter::new(self, dst)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn in_degree(&self, dst: NodeId) -> usize {
        self.offsets_in[dst as usize + 1] - self.offsets_in[dst as usize]
    }

    pub fn out_degree(&self, src: NodeId) -> usize {
        self.offsets_out[src as usize + 1] - self.offsets_out[src as usize]
    }
}

pub struct IncomingEdgeIter<'a> {
    graph: &'a Graph,
    next: usize,
    end: usize,
}

impl<'a> IncomingEdgeIter<'a> {
    pub fn new(graph: &'a Graph, node_id: NodeId) -> Self {
        Self {
            graph,
            next: graph.offsets_in[node_id as usize],
            end: graph.offsets_in[node_id as usize + 1],
        }
    }
}

impl Iterator for IncomingEdgeIter<'_> {
    type Item = IncomingEdgeRef;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(IncomingEdgeRef::new(
            self.graph.srcs_in[i],
            self.graph.quality_in[i],
            self.graph.last_seen_in[i],
        ))
    }
}

pub struct OutgoingEdgeIter<'a> {
    graph: &'a Graph,
    next: usize,
    end: usize,
}

impl<'a> OutgoingEdgeIter<'a> {
    pub fn new(graph: &'a Graph, node_id: NodeId) -> Self {
        Self {
            graph,
            next: graph.offsets_out[node_id as usize],
            end: graph.offsets_out[node_id as usize + 1],
        }
    }
}

impl Iterator for OutgoingEdgeIter<'_> {
    type Item = OutgoingEdgeRef;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(OutgoingEdgeRef::new(
            self.graph.dsts[i],
            self.graph.quality_out[i],
            self.graph.last_seen_out[i],
        ))
    }
}

#[derive(Debug, PartialEq)]
pub struct OutgoingEdgeRef {
    pub dst: NodeId,
    pub quality: f64,
    pub last_seen: DateTime<Utc>,
}

impl OutgoingEdgeRef {
    pub fn new(dst: NodeId, quality: f64, last_seen: DateTime<Utc>) -> Self {
        Self {
            dst,
            quality,
            last_seen,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct IncomingEdgeRef {
    pub src: NodeId,
    pub quality: f64,
    pub last_seen: DateTime<Utc>,
}

impl IncomingEdgeRef {
    pub fn new(src: NodeId, quality: f64, last_seen: DateTime<Utc>) -> Self {
        Self {
            src,
            quality,
            last_seen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, minute, 0).unwrap()
    }

    #[test]
    fn test_no_edges() {
        let g = GraphBuilder::new(2).freeze();

        assert_eq!(3, g.offsets_out.len());
        assert!(g.offsets_out.iter().all(|off| *off == 0));
        assert_eq!(0, g.edge_count());
        assert_eq!(0, g.edges_from(0).count());
        assert_eq!(0, g.edges_from(1).count());
        assert_eq!(0, g.edges_to(0).count());
        assert_eq!(0, g.edges_to(1).count());
    }

    #[test]
    fn test_single_follow() {
        let mut gb = GraphBuilder::new(2);
        gb.add_edge(0, 1, 0.5, at(3));
        let g = gb.freeze();

        assert_eq!(vec![0, 1, 1], g.offsets_out);
        assert_eq!(Some(OutgoingEdgeRef::new(1, 0.5, at(3))), g.edges_from(0).next());
        assert_eq!(None, g.edges_from(1).next());

        assert_eq!(Some(IncomingEdgeRef::new(0, 0.5, at(3))), g.edges_to(1).next());
        assert_eq!(None, g.edges_to(0).next());
    }

    #[test]
    fn test_many_followers_of_one_person() {
        let mut gb = GraphBuilder::new(4);
        gb.add_edge(1, 0, 0.4, at(2));
        gb.add_edge(2, 0, 0.6, at(2));
        gb.add_edge(3, 0, 0.8, at(2));
        let g = gb.freeze();

        assert_eq!(vec![0, 3, 3, 3, 3], g.offsets_in);
        assert_eq!(3, g.in_degree(0));
        assert_eq!(0, g.out_degree(0));
        let srcs = g.edges_to(0).map(|e| e.src).collect::<Vec<_>>();
        assert_eq!(vec![1, 2, 3], srcs);
    }

    #[test]
    fn test_one_person_following_many() {
        let mut gb = GraphBuilder::new(4);
        gb.add_edge(0, 1, 0.4, at(1));
        gb.add_edge(0, 2, 0.5, at(2));
        gb.add_edge(0, 3, 0.6, at(3));
        let g = gb.freeze();

        assert_eq!(vec![0, 3, 3, 3, 3], g.offsets_out);
        let mut iter = g.edges_from(0);
        assert_eq!(Some(OutgoingEdgeRef::new(1, 0.4, at(1))), iter.next());
        assert_eq!(Some(OutgoingEdgeRef::new(2, 0.5, at(2))), iter.next());
        assert_eq!(Some(OutgoingEdgeRef::new(3, 0.6, at(3))), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn test_unordered_edges() {
        let mut gb = GraphBuilder::new(3);
        gb.add_edge(0, 2, 0.7, at(8));
        gb.add_edge(2, 0, 0.1, at(2));
        gb.add_edge(0, 1, 0.3, at(4));
        gb.add_edge(1, 2, 0.5, at(6));
        let g = gb.freeze();

        assert_eq!(vec![0, 2, 3, 4], g.offsets_out);
        assert_eq!(vec![0, 1, 2, 4], g.offsets_in);
        let mut iter = g.edges_from(0);
        assert_eq!(Some(OutgoingEdgeRef::new(2, 0.7, at(8))), iter.next());
        assert_eq!(Some(OutgoingEdgeRef::new(1, 0.3, at(4))), iter.next());
        assert_eq!(None, iter.next());
        let mut iter = g.edges_from(2);
        assert_eq!(Some(OutgoingEdgeRef::new(0, 0.1, at(2))), iter.next());
        assert_eq!(None, iter.next());

        let mut iter = g.edges_to(2);
        assert_eq!(Some(IncomingEdgeRef::new(0, 0.7, at(8))), iter.next());
        assert_eq!(Some(IncomingEdgeRef::new(1, 0.5, at(6))), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn test_interleaved_sources_keep_insertion_order() {
        let mut gb = GraphBuilder::new(3);
        gb.add_edge(2, 0, 0.1, at(1));
        gb.add_edge(1, 0, 0.2, at(1));
        gb.add_edge(0, 1, 0.3, at(2));
        gb.add_edge(2, 1, 0.4, at(2));
        gb.add_edge(1, 2, 0.5, at(3));
        gb.add_edge(0, 2, 0.6, at(3));
        let g = gb.freeze();

        for src in 0..3 {
            assert_eq!(2, g.out_degree(src));
            assert!(g.edges_from(src).all(|e| e.dst != src));
        }
        let quality = |src| g.edges_from(src).map(|e| e.quality).collect::<Vec<_>>();
        assert_eq!(vec![0.3, 0.6], quality(0));
        assert_eq!(vec![0.2, 0.5], quality(1));
        assert_eq!(vec![0.1, 0.4], quality(2));
        let srcs = g.edges_to(0).map(|e| e.src).collect::<Vec<_>>();
        assert_eq!(vec![2, 1], srcs);
    }
}
