use std::collections::{HashMap, HashSet, VecDeque};

/// Tokens within this many positions of each other are adjacent.
pub const WINDOW: usize = 2;

/// Undirected token adjacency of one document.
///
/// Neighbour lists are kept as sequences; repeated pairs add repeated edges, which
/// does not change reachability. Only tokens with at least one neighbour are nodes.
#[derive(Debug, Default, Clone)]
pub struct ProximityGraph {
    adjacency: HashMap<String, Vec<String>>,
}

impl ProximityGraph {
    pub fn build(tokens: &[String]) -> Self {
        let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
        for (i, left) in tokens.iter().enumerate() {
            for right in tokens.iter().skip(i + 1).take(WINDOW) {
                adjacency.entry(left.clone()).or_default().push(right.clone());
                adjacency.entry(right.clone()).or_default().push(left.clone());
            }
        }
        Self { adjacency }
    }

    pub fn neighbours(&self, token: &str) -> &[String] {
        self.adjacency.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Breadth-first search from every seed present in the graph.
    ///
    /// Seeds absent from the graph are ignored; each node is visited once.
    pub fn reachable<'a, I, S>(&self, seeds: I) -> HashSet<&str>
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<str> + ?Sized + 'a,
    {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        for seed in seeds {
            if let Some((node, _)) = self.adjacency.get_key_value(seed.as_ref()) {
                if visited.insert(node.as_str()) {
                    queue.push_back(node.as_str());
                }
            }
        }
        while let Some(current) = queue.pop_front() {
            for next in self.neighbours(current) {
                if visited.insert(next.as_str()) {
                    queue.push_back(next.as_str());
                }
            }
        }
        visited
    }
}
