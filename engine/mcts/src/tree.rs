//! Search tree structure with arena allocation.
//!
//! Nodes live in a contiguous Vec owned by the tree and refer to each other
//! through [`NodeId`] indices. A tree is built for a single determinization
//! and dropped as a whole when its round ends.

use engine_core::{GameState, Outcome};
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::node::{MoveStats, NodeId, SearchNode};
use crate::search::SearchError;

/// Search tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<S>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S: GameState> MctsTree<S> {
    /// Create a new tree rooted at `root_state`.
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: SearchNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[SearchNode<S>] {
        &self.nodes
    }

    /// Value of a node for the player who moved into it: that player's wins
    /// minus the opponent's wins. `None` for the root.
    pub fn value(&self, id: NodeId) -> Option<i64> {
        let node = self.get(id);
        if node.parent.is_none() {
            return None;
        }
        let mover = self.get(node.parent).state.mover();
        Some(node.value_for(mover))
    }

    /// Pick the child of `node_id` with the highest UCB1 score.
    ///
    /// Scores are taken from the perspective of the mover at `node_id`.
    /// Ties keep the earliest child. Returns None for a node without children.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let mover = node.state.mover();
        // Parent visits are at least 1 once a child has been backpropagated.
        let ln_n = f64::from(node.visits.max(1)).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let score = self.get(child_id).ucb_score(mover, ln_n, exploration);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Descend from `from` while nodes are fully expanded and non-terminal.
    ///
    /// Returns the first node that is terminal or still has untried moves.
    pub fn select(&self, from: NodeId, exploration: f64) -> NodeId {
        let mut current = from;
        loop {
            let node = self.get(current);
            if node.is_terminal() || !node.is_fully_expanded() {
                return current;
            }
            match self.select_child(current, exploration) {
                Some(child_id) => current = child_id,
                None => return current,
            }
        }
    }

    /// Expand one untried move of `node_id` and return the new child.
    ///
    /// The move is drawn uniformly at random from the untried list.
    pub fn expand(
        &mut self,
        node_id: NodeId,
        rng: &mut ChaCha20Rng,
    ) -> Result<NodeId, SearchError> {
        let node = self.get_mut(node_id);
        let mv = match node.take_untried(rng) {
            Some(mv) => mv,
            None if node.children.is_empty() => return Err(SearchError::NoLegalMoves),
            None => {
                return Err(SearchError::ContractViolation(
                    "expansion requested on a fully expanded node".to_string(),
                ))
            }
        };
        let child_state = node.state.apply(&mv).map_err(|err| {
            SearchError::ContractViolation(format!("legal move {mv:?} was rejected: {err}"))
        })?;

        Ok(self.add_child(node_id, mv, child_state))
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, mv: S::Move, state: S) -> NodeId {
        let child_id = self.allocate(SearchNode::new_child(parent_id, mv, state));
        self.get_mut(parent_id).children.push(child_id);
        child_id
    }

    /// Record `outcome` on every node from `leaf_id` up to the root.
    pub fn backpropagate(&mut self, leaf_id: NodeId, outcome: &Outcome) {
        let mut current_id = leaf_id;
        let mut depth = 0u32;
        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.record(outcome);
            current_id = node.parent;
            depth += 1;
        }
        trace!(leaf = leaf_id.0, depth, ?outcome, "backpropagated");
    }

    /// Statistics of every root child, from the root mover's perspective,
    /// in expansion order.
    pub fn root_move_stats(&self) -> Vec<(S::Move, MoveStats)> {
        let root = self.get(self.root);
        let mover = root.state.mover();
        root.children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child
                    .move_played
                    .clone()
                    .map(|mv| (mv, child.stats_for(mover)))
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: self.get(self.root).visits,
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0u32)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(self.get(id).children.iter().map(|&child| (child, depth + 1)));
        }
        max_depth
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_games::{DeadEnd, TwoPly};
    use engine_core::Player;
    use games_tictactoe::State;
    use rand::SeedableRng;

    fn win(player: Player) -> Outcome {
        Outcome::Win { player, score: 1 }
    }

    #[test]
    fn test_new_tree() {
        let tree = MctsTree::new(State::new());

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId(0));

        let root = tree.get(tree.root());
        assert!(root.parent.is_none());
        assert_eq!(root.state, State::new());
        assert_eq!(tree.value(tree.root()), None);
    }

    #[test]
    fn test_expand_adds_one_child() {
        let mut tree = MctsTree::new(State::new());
        let mut rng = ChaCha20Rng::seed_from_u64(3);

        let child_id = tree.expand(tree.root(), &mut rng).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(child_id, NodeId(1));

        let root = tree.get(tree.root());
        assert_eq!(root.children, vec![child_id]);
        assert_eq!(root.untried_moves().map(|m| m.len()), Some(8));

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        let mv = child.move_played.unwrap();
        assert_eq!(child.state, State::new().make_move(mv).unwrap());
    }

    #[test]
    fn test_expand_without_moves_is_contract_violation() {
        let mut tree = MctsTree::new(DeadEnd::stuck());
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let err = tree.expand(tree.root(), &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::NoLegalMoves));
    }

    #[test]
    fn test_backpropagate() {
        let mut tree = MctsTree::new(TwoPly::new());
        let mut rng = ChaCha20Rng::seed_from_u64(0);

        // Create a chain: root -> child -> grandchild
        let child_id = tree.expand(tree.root(), &mut rng).unwrap();
        let grandchild_id = tree.expand(child_id, &mut rng).unwrap();

        tree.backpropagate(grandchild_id, &win(Player::Two));
        tree.backpropagate(child_id, &Outcome::Draw);

        assert_eq!(tree.get(grandchild_id).visits, 1);
        assert_eq!(tree.get(child_id).visits, 2);
        assert_eq!(tree.get(tree.root()).visits, 2);

        // The child was entered by player one, the grandchild by player two.
        assert_eq!(tree.value(child_id), Some(-1));
        assert_eq!(tree.value(grandchild_id), Some(1));
        assert_eq!(tree.get(child_id).draws(), 1);
    }

    #[test]
    fn test_select_child_prefers_unvisited_then_earliest() {
        let mut tree = MctsTree::new(TwoPly::new());
        let a = tree.add_child(tree.root(), 0, TwoPly::after(&[0]));
        let b = tree.add_child(tree.root(), 1, TwoPly::after(&[1]));

        // Both unvisited: the first one wins the tie.
        assert_eq!(tree.select_child(tree.root(), 1.0), Some(a));

        tree.backpropagate(a, &win(Player::One));
        assert_eq!(tree.select_child(tree.root(), 1.0), Some(b));

        tree.backpropagate(b, &win(Player::Two));
        // Same visits, player one won through `a` only.
        assert_eq!(tree.select_child(tree.root(), 1.0), Some(a));
        assert_eq!(tree.select_child(a, 1.0), None);
    }

    #[test]
    fn test_select_stops_at_unexpanded_node() {
        let mut tree = MctsTree::new(TwoPly::new());
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        assert_eq!(tree.select(tree.root(), 1.0), tree.root());

        let first = tree.expand(tree.root(), &mut rng).unwrap();
        tree.backpropagate(first, &win(Player::One));
        // Root still has an untried move.
        assert_eq!(tree.select(tree.root(), 1.0), tree.root());

        let second = tree.expand(tree.root(), &mut rng).unwrap();
        tree.backpropagate(second, &win(Player::Two));
        // Fully expanded: descend into the better child, which is unexpanded.
        assert_eq!(tree.select(tree.root(), 1.0), first);
    }

    #[test]
    fn test_expand_fully_expanded_node_fails() {
        let mut tree = MctsTree::new(TwoPly::new());
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        tree.expand(tree.root(), &mut rng).unwrap();
        tree.expand(tree.root(), &mut rng).unwrap();
        let err = tree.expand(tree.root(), &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::ContractViolation(_)));
    }

    #[test]
    fn test_root_move_stats() {
        let mut tree = MctsTree::new(TwoPly::new());
        let a = tree.add_child(tree.root(), 0, TwoPly::after(&[0]));
        let b = tree.add_child(tree.root(), 1, TwoPly::after(&[1]));
        tree.backpropagate(a, &win(Player::One));
        tree.backpropagate(b, &win(Player::Two));
        tree.backpropagate(b, &Outcome::Draw);

        let stats = tree.root_move_stats();
        assert_eq!(
            stats,
            vec![
                (
                    0,
                    MoveStats {
                        wins: 1,
                        draws: 0,
                        visits: 1
                    }
                ),
                (
                    1,
                    MoveStats {
                        wins: 0,
                        draws: 1,
                        visits: 2
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = MctsTree::new(State::new());
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let child = tree.expand(tree.root(), &mut rng).unwrap();
        tree.expand(child, &mut rng).unwrap();
        tree.expand(tree.root(), &mut rng).unwrap();

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.root_visits, 0);
    }
}
