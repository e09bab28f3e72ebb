//! Domain-agnostic tests for the alpha-beta search algorithm.
//!
//! Test coverage:
//! - Nim (winning moves, losing positions, error handling)
//! - Agreement with exhaustive minimax on seeded random trees
//! - History-driven move ordering
//! - Quiescence extension at the horizon
//! - Time budget and depth limits

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

/// State of a Nim game: players take 1-3 objects, last to take wins.
#[derive(Clone, Debug)]
struct NimState {
    pile: u8,
    is_player_one_turn: bool,
}

impl NimState {
    fn new(pile: u8) -> Self {
        Self {
            pile,
            is_player_one_turn: true,
        }
    }

    fn score(&self) -> i32 {
        if self.pile == 0 {
            // the previous player took the last object and won
            return if self.is_player_one_turn { -1000 } else { 1000 };
        }
        // pile % 4 == 0 is a losing position for the player to move
        let to_move_wins = self.pile % 4 != 0;
        if to_move_wins == self.is_player_one_turn {
            100
        } else {
            -100
        }
    }
}

impl GameState for NimState {
    fn is_terminal(&self) -> bool {
        self.pile == 0
    }

    fn utility(&self) -> i32 {
        self.score()
    }

    fn utility_swing(&self) -> i32 {
        0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct NimMove {
    take: u8,
}

struct NimMoveGenerator;

impl MoveGenerator<NimState> for NimMoveGenerator {
    type Move = NimMove;
    type MoveList = Vec<NimMove>;
    type Error = &'static str;

    fn generate_moves(&self, state: &NimState) -> Vec<NimMove> {
        (1..=std::cmp::min(3, state.pile))
            .map(|take| NimMove { take })
            .collect()
    }

    fn successor(
        &self,
        state: &NimState,
        game_move: &NimMove,
        _expansion: Expansion,
    ) -> Result<NimState, Self::Error> {
        if game_move.take > state.pile || game_move.take == 0 || game_move.take > 3 {
            return Err("Invalid move");
        }
        Ok(NimState {
            pile: state.pile - game_move.take,
            is_player_one_turn: !state.is_player_one_turn,
        })
    }
}

impl From<&'static str> for SearchError {
    fn from(_: &'static str) -> Self {
        SearchError::NoAvailableMoves
    }
}

struct NimEvaluator;

impl Evaluator<NimState> for NimEvaluator {
    fn evaluate(&self, state: &NimState) -> i32 {
        state.score()
    }
}

/// Counts how often each move was credited.
struct CountingHistory<M> {
    counts: HashMap<M, u32>,
}

impl<M> Default for CountingHistory<M> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl<M: std::hash::Hash + Eq + Clone> MoveHistory<M> for CountingHistory<M> {
    fn score(&self, game_move: &M) -> u32 {
        self.counts.get(game_move).copied().unwrap_or(0)
    }

    fn record(&mut self, game_move: &M) {
        *self.counts.entry(game_move.clone()).or_insert(0) += 1;
    }
}

fn search_nim(pile: u8, depth: u8) -> Result<NimMove, SearchError> {
    let mut context = SearchContext::with_depth(depth);
    let mut history = CountingHistory::default();
    alpha_beta_search(
        &mut context,
        &NimState::new(pile),
        &NimMoveGenerator,
        &NimEvaluator,
        &mut history,
        &TimeBudget::unlimited(),
    )
}

#[test]
fn test_nim_finds_winning_move_from_5() {
    let best_move = search_nim(5, 6).unwrap();
    assert_eq!(
        best_move.take, 1,
        "From pile of 5, should take 1 to leave opponent with 4"
    );
}

#[test]
fn test_nim_finds_winning_move_from_7() {
    let best_move = search_nim(7, 8).unwrap();
    assert_eq!(best_move.take, 3);
}

#[test]
fn test_nim_takes_the_last_objects() {
    for pile in 1..=3 {
        assert_eq!(search_nim(pile, 1).unwrap().take, pile);
    }
}

#[test]
fn test_nim_losing_position_still_returns_a_move() {
    let mut context = SearchContext::with_depth(4);
    let mut history = CountingHistory::default();
    let best_move = alpha_beta_search(
        &mut context,
        &NimState::new(4),
        &NimMoveGenerator,
        &NimEvaluator,
        &mut history,
        &TimeBudget::unlimited(),
    )
    .unwrap();
    assert!((1..=3).contains(&best_move.take));
    assert_eq!(context.last_score(), Some(-1000));
}

#[test]
fn test_no_moves_is_an_error() {
    assert_eq!(search_nim(0, 3), Err(SearchError::NoAvailableMoves));
}

#[test]
fn test_zero_depth_is_an_error() {
    assert_eq!(search_nim(5, 0), Err(SearchError::DepthTooLow));
}

/// A node of an explicit game tree. Leaves are terminal.
struct TreeNode {
    value: i32,
    children: Vec<usize>,
}

/// Random tree with a fixed branching factor and leaf values in a narrow
/// range, so the quiescence threshold never triggers.
fn random_tree(seed: u64, branching: usize, height: u8) -> Rc<Vec<TreeNode>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut nodes = vec![TreeNode {
        value: rng.gen_range(-500..500),
        children: vec![],
    }];
    let mut frontier = vec![0];
    for _ in 0..height {
        let mut next = vec![];
        for parent in frontier {
            for _ in 0..branching {
                let id = nodes.len();
                nodes.push(TreeNode {
                    value: rng.gen_range(-500..500),
                    children: vec![],
                });
                nodes[parent].children.push(id);
                next.push(id);
            }
        }
        frontier = next;
    }
    Rc::new(nodes)
}

#[derive(Clone)]
struct TreeState {
    nodes: Rc<Vec<TreeNode>>,
    id: usize,
    utility: i32,
    swing: i32,
}

impl TreeState {
    fn root(nodes: Rc<Vec<TreeNode>>) -> Self {
        Self {
            nodes,
            id: 0,
            utility: 0,
            swing: 0,
        }
    }

    fn node(&self) -> &TreeNode {
        &self.nodes[self.id]
    }
}

impl GameState for TreeState {
    fn is_terminal(&self) -> bool {
        self.node().children.is_empty()
    }

    fn utility(&self) -> i32 {
        self.utility
    }

    fn utility_swing(&self) -> i32 {
        self.swing
    }
}

/// Moves are child node ids. Every expansion is logged so tests can see
/// what the search looked at.
#[derive(Default)]
struct TreeMoveGenerator {
    expanded: RefCell<Vec<usize>>,
}

impl MoveGenerator<TreeState> for TreeMoveGenerator {
    type Move = usize;
    type MoveList = Vec<usize>;
    type Error = std::convert::Infallible;

    fn generate_moves(&self, state: &TreeState) -> Vec<usize> {
        state.node().children.clone()
    }

    fn successor(
        &self,
        state: &TreeState,
        game_move: &usize,
        expansion: Expansion,
    ) -> Result<TreeState, Self::Error> {
        self.expanded.borrow_mut().push(*game_move);
        let mut child = TreeState {
            nodes: Rc::clone(&state.nodes),
            id: *game_move,
            utility: 0,
            swing: 0,
        };
        let value = child.node().value;
        match expansion {
            Expansion::Frontier { parent_utility } => {
                child.utility = value;
                child.swing = value - parent_utility;
            }
            Expansion::Interior if child.is_terminal() => child.utility = value,
            Expansion::Interior => {}
        }
        Ok(child)
    }
}

struct TreeEvaluator;

impl Evaluator<TreeState> for TreeEvaluator {
    fn evaluate(&self, state: &TreeState) -> i32 {
        state.node().value
    }
}

/// Plain minimax with the node value as the static evaluation.
fn minimax(nodes: &[TreeNode], id: usize, depth: u8, maximizing: bool) -> i32 {
    let node = &nodes[id];
    if depth == 0 || node.children.is_empty() {
        return node.value;
    }
    let values = node
        .children
        .iter()
        .map(|&child| minimax(nodes, child, depth - 1, !maximizing));
    if maximizing {
        values.max().unwrap()
    } else {
        values.min().unwrap()
    }
}

#[test]
fn test_matches_exhaustive_minimax() {
    for seed in 0..20 {
        let nodes = random_tree(seed, 3, 5);
        for depth in 1..=5 {
            let mut context = SearchContext::with_depth(depth);
            let mut history = CountingHistory::default();
            let generator = TreeMoveGenerator::default();
            let best_move = alpha_beta_search(
                &mut context,
                &TreeState::root(Rc::clone(&nodes)),
                &generator,
                &TreeEvaluator,
                &mut history,
                &TimeBudget::unlimited(),
            )
            .unwrap();

            let expected = minimax(&nodes, 0, depth, true);
            assert_eq!(
                context.last_score(),
                Some(expected),
                "seed {} depth {}",
                seed,
                depth
            );
            assert_eq!(
                minimax(&nodes, best_move, depth - 1, false),
                expected,
                "seed {} depth {} picked a suboptimal move",
                seed,
                depth
            );
        }
    }
}

#[test]
fn test_pruning_skips_part_of_the_tree() {
    let nodes = random_tree(7, 4, 4);
    let full_tree_size = nodes.len();
    let mut context = SearchContext::with_depth(4);
    let mut history = CountingHistory::default();
    let generator = TreeMoveGenerator::default();
    alpha_beta_search(
        &mut context,
        &TreeState::root(Rc::clone(&nodes)),
        &generator,
        &TreeEvaluator,
        &mut history,
        &TimeBudget::unlimited(),
    )
    .unwrap();

    // plain minimax over depths 1 to 4 visits every node of each prefix tree
    let unpruned: usize = (1..=4u32)
        .map(|depth| (0..=depth).map(|ply| 4usize.pow(ply)).sum::<usize>())
        .sum();
    assert_eq!(unpruned, 452);
    assert_eq!(full_tree_size, 341);
    assert_eq!(context.depth_reached(), 4);
    assert!(context.cutoffs() > 0);
    assert!(context.searched_position_count() < unpruned);
}

fn hand_built_tree(values: Vec<(i32, Vec<usize>)>) -> Rc<Vec<TreeNode>> {
    Rc::new(
        values
            .into_iter()
            .map(|(value, children)| TreeNode { value, children })
            .collect(),
    )
}

#[test]
fn test_history_orders_moves() {
    // root -> 1, 2, 3, all leaves
    let nodes = hand_built_tree(vec![
        (0, vec![1, 2, 3]),
        (10, vec![]),
        (20, vec![]),
        (30, vec![]),
    ]);
    let mut history = CountingHistory::default();
    history.counts.insert(3, 5);
    history.counts.insert(2, 1);

    let mut context = SearchContext::with_depth(1);
    let generator = TreeMoveGenerator::default();
    let best_move = alpha_beta_search(
        &mut context,
        &TreeState::root(nodes),
        &generator,
        &TreeEvaluator,
        &mut history,
        &TimeBudget::unlimited(),
    )
    .unwrap();

    assert_eq!(best_move, 3);
    // the first expansion is the breadth probe on the unsorted first move
    assert_eq!(*generator.expanded.borrow(), vec![1, 3, 2, 1]);
    assert_eq!(history.score(&3), 6);
}

#[test]
fn test_cutoff_move_is_recorded() {
    // max at root, min at 1 and 2
    //         0
    //      /     \
    //     1       2
    //    / \     / \
    //   3   4   5   6
    //   5   8   2   9
    let nodes = hand_built_tree(vec![
        (0, vec![1, 2]),
        (0, vec![3, 4]),
        (0, vec![5, 6]),
        (5, vec![]),
        (8, vec![]),
        (2, vec![]),
        (9, vec![]),
    ]);
    let mut history = CountingHistory::default();
    let mut context = SearchContext::with_depth(2);
    let generator = TreeMoveGenerator::default();
    let best_move = alpha_beta_search(
        &mut context,
        &TreeState::root(nodes),
        &generator,
        &TreeEvaluator,
        &mut history,
        &TimeBudget::unlimited(),
    )
    .unwrap();

    assert_eq!(best_move, 1);
    assert_eq!(context.last_score(), Some(5));
    // node 5 refutes move 2 at depth 2, so node 6 is never expanded
    assert!(history.score(&5) >= 1);
    assert!(!generator.expanded.borrow().contains(&6));
}

#[test]
fn test_fail_low_node_records_its_best_move() {
    // max at root, 3 and 5; min at 1 and 2
    //        0
    //      /   \
    //     1     2
    //     |     |
    //     3     5
    //     |    / \
    //     4   6   7
    //     5   1   2
    let nodes = hand_built_tree(vec![
        (0, vec![1, 2]),
        (0, vec![3]),
        (0, vec![5]),
        (0, vec![4]),
        (5, vec![]),
        (0, vec![6, 7]),
        (1, vec![]),
        (2, vec![]),
    ]);
    let mut history = CountingHistory::default();
    let mut context = SearchContext::with_depth(3);
    let best_move = alpha_beta_search(
        &mut context,
        &TreeState::root(nodes),
        &TreeMoveGenerator::default(),
        &TreeEvaluator,
        &mut history,
        &TimeBudget::unlimited(),
    )
    .unwrap();

    assert_eq!(best_move, 1);
    assert_eq!(context.last_score(), Some(5));
    // node 5 is searched with alpha = 5, so both leaves fail low; the better
    // one is still credited
    assert_eq!(history.score(&7), 1);
    assert_eq!(history.score(&6), 0);
}

#[test]
fn test_quiescence_extends_unsettled_frontier() {
    // root -> 1 (quiet) and 2 (swings by 5000, but 2's reply gives it back)
    let nodes = hand_built_tree(vec![
        (0, vec![1, 2]),
        (100, vec![]),
        (5000, vec![3]),
        (-200, vec![]),
    ]);

    let mut context = SearchContext::with_depth(1);
    let mut history = CountingHistory::default();
    let generator = TreeMoveGenerator::default();
    let best_move = alpha_beta_search(
        &mut context,
        &TreeState::root(Rc::clone(&nodes)),
        &generator,
        &TreeEvaluator,
        &mut history,
        &TimeBudget::unlimited(),
    )
    .unwrap();
    assert_eq!(best_move, 1);
    assert_eq!(context.last_score(), Some(100));
    assert_eq!(context.quiescence_extensions(), 1);

    let mut context = SearchContext::new(SearchConfig {
        max_depth: 1,
        quiescence_depth: 0,
        ..SearchConfig::default()
    });
    let mut history = CountingHistory::default();
    let best_move = alpha_beta_search(
        &mut context,
        &TreeState::root(nodes),
        &TreeMoveGenerator::default(),
        &TreeEvaluator,
        &mut history,
        &TimeBudget::unlimited(),
    )
    .unwrap();
    assert_eq!(best_move, 2);
    assert_eq!(context.quiescence_extensions(), 0);
}

#[test]
fn test_empty_clock_completes_depth_one_only() {
    let nodes = random_tree(3, 3, 4);
    let mut context = SearchContext::with_depth(4);
    let mut history = CountingHistory::default();
    let result = alpha_beta_search(
        &mut context,
        &TreeState::root(nodes),
        &TreeMoveGenerator::default(),
        &TreeEvaluator,
        &mut history,
        &TimeBudget::new(Duration::from_secs(0), 8),
    );
    assert!(result.is_ok());
    assert_eq!(context.depth_reached(), 1);
}
