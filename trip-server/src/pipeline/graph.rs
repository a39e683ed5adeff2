//! Stage dependency graph.

use std::collections::HashSet;

use super::state::StageName;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("stage {0} declared twice")]
    Duplicate(StageName),

    #[error("stage {stage} depends on undeclared stage {dependency}")]
    UnknownDependency {
        stage: StageName,
        dependency: StageName,
    },

    #[error("dependency cycle among {0:?}")]
    Cycle(Vec<StageName>),
}

/// Stages with declared dependencies.
///
/// Declaration order is significant: layers list their stages in the
/// order they were added, which fixes the order outputs are applied.
#[derive(Debug, Clone, Default)]
pub struct StageGraph {
    nodes: Vec<(StageName, Vec<StageName>)>,
}

impl StageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a stage. Dependencies must already be declared.
    pub fn add(&mut self, stage: StageName, depends_on: &[StageName]) -> Result<(), GraphError> {
        if self.contains(stage) {
            return Err(GraphError::Duplicate(stage));
        }
        for &dependency in depends_on {
            if dependency != stage && !self.contains(dependency) {
                return Err(GraphError::UnknownDependency { stage, dependency });
            }
        }
        self.nodes.push((stage, depends_on.to_vec()));
        Ok(())
    }

    pub fn contains(&self, stage: StageName) -> bool {
        self.nodes.iter().any(|(s, _)| *s == stage)
    }

    pub fn stages(&self) -> impl Iterator<Item = StageName> + '_ {
        self.nodes.iter().map(|(s, _)| *s)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Group stages into layers; every stage's dependencies sit in earlier
    /// layers.
    pub fn layers(&self) -> Result<Vec<Vec<StageName>>, GraphError> {
        let mut done: HashSet<StageName> = HashSet::new();
        let mut layers = Vec::new();

        while done.len() < self.nodes.len() {
            let layer: Vec<StageName> = self
                .nodes
                .iter()
                .filter(|(s, deps)| !done.contains(s) && deps.iter().all(|d| done.contains(d)))
                .map(|(s, _)| *s)
                .collect();

            if layer.is_empty() {
                let stuck = self
                    .nodes
                    .iter()
                    .map(|(s, _)| *s)
                    .filter(|s| !done.contains(s))
                    .collect();
                return Err(GraphError::Cycle(stuck));
            }

            done.extend(layer.iter().copied());
            layers.push(layer);
        }

        Ok(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StageName::*;

    fn planner_graph() -> StageGraph {
        let mut g = StageGraph::new();
        g.add(CollectInput, &[]).unwrap();
        for w in StageName::WORKERS {
            g.add(w, &[CollectInput]).unwrap();
        }
        g.add(CompileResults, &StageName::WORKERS).unwrap();
        g
    }

    #[test]
    fn planner_layers() {
        let layers = planner_graph().layers().unwrap();
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0], vec![CollectInput]);
        assert_eq!(layers[1], StageName::WORKERS.to_vec());
        assert_eq!(layers[2], vec![CompileResults]);
    }

    #[test]
    fn layers_keep_declaration_order() {
        let mut g = StageGraph::new();
        g.add(CollectInput, &[]).unwrap();
        g.add(SearchRoad, &[CollectInput]).unwrap();
        g.add(SearchFlights, &[CollectInput]).unwrap();
        let layers = g.layers().unwrap();
        assert_eq!(layers[1], vec![SearchRoad, SearchFlights]);
    }

    #[test]
    fn chained_dependencies_make_more_layers() {
        let mut g = StageGraph::new();
        g.add(CollectInput, &[]).unwrap();
        g.add(SearchFlights, &[CollectInput]).unwrap();
        g.add(BuildItinerary, &[SearchFlights]).unwrap();
        assert_eq!(g.layers().unwrap().len(), 3);
    }

    #[test]
    fn duplicate_is_rejected() {
        let mut g = planner_graph();
        assert_eq!(
            g.add(SearchHotels, &[CollectInput]),
            Err(GraphError::Duplicate(SearchHotels))
        );
    }

    #[test]
    fn unknown_dependency_is_rejected() {
        let mut g = StageGraph::new();
        let err = g.add(SearchFlights, &[CollectInput]).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownDependency {
                stage: SearchFlights,
                dependency: CollectInput
            }
        );
        assert_eq!(
            err.to_string(),
            "stage search_flights depends on undeclared stage collect_input"
        );
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let mut g = StageGraph::new();
        g.add(CollectInput, &[]).unwrap();
        g.add(SearchFlights, &[SearchFlights]).unwrap();
        assert_eq!(g.layers(), Err(GraphError::Cycle(vec![SearchFlights])));
    }
}
