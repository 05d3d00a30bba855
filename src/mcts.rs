//! Monte-Carlo tree search over any [`Game`].
//!
//! The tree is exclusively owned by the search: nodes hold their children by
//! value and there are no parent links. Selection records the path it walks
//! as child indices, so backpropagation can revisit every ancestor of the
//! expanded node.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use crate::constants::{ROLLOUTS_PER_EXPANSION, UCT_EXPLORATION};
use crate::game::{Game, PlayerId};
use crate::player::random_move;

/// One node of the search tree: a game state, the move that produced it and
/// the playout statistics gathered below it.
pub struct EvalNode<G: Game> {
    pub game: G,
    /// Move leading to this state, `None` at the root.
    pub mv: Option<G::Move>,
    /// Number of playouts that went through this node.
    pub n: u32,
    /// Win credit accumulated for the player whose move produced this node.
    pub w: f64,
    /// Legal moves not yet expanded into children. Empty from the start when
    /// the state is terminal.
    pub untried: Vec<G::Move>,
    pub children: Vec<EvalNode<G>>,
}

impl<G: Game> EvalNode<G> {
    pub fn new(game: G, mv: Option<G::Move>) -> Self {
        let untried = if game.winner().is_some() {
            Vec::new()
        } else {
            game.possible_moves()
        };
        Self {
            game,
            mv,
            n: 0,
            w: 0.0,
            untried,
            children: Vec::new(),
        }
    }

    /// Win rate from the viewpoint of the player whose move produced this
    /// node, 0.0 before any playout.
    pub fn score(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.w / f64::from(self.n)
        }
    }

    /// Fold a batch of rollout outcomes into this node's statistics. The win
    /// credit goes to the opponent of the player to move here, which is the
    /// player who chose the move leading in.
    pub fn update_stats(&mut self, results: &RolloutResults) {
        self.n += results.simulations();
        self.w += results.wins(self.game.player().opponent());
    }
}

/// Aggregated outcomes of one or more rollouts. Purely additive: batches
/// combine by summation.
#[derive(Clone, Debug, Default)]
pub struct RolloutResults {
    wins_one: f64,
    wins_two: f64,
    simulations: u32,
}

impl RolloutResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished rollout. A draw credits half a win to each side.
    pub fn update(&mut self, winner: PlayerId) {
        match winner {
            PlayerId::One => self.wins_one += 1.0,
            PlayerId::Two => self.wins_two += 1.0,
            PlayerId::None => {
                self.wins_one += 0.5;
                self.wins_two += 0.5;
            }
        }
        self.simulations += 1;
    }

    pub fn add(&mut self, other: &RolloutResults) {
        self.wins_one += other.wins_one;
        self.wins_two += other.wins_two;
        self.simulations += other.simulations;
    }

    pub fn wins(&self, player: PlayerId) -> f64 {
        match player {
            PlayerId::One => self.wins_one,
            PlayerId::Two => self.wins_two,
            PlayerId::None => 0.0,
        }
    }

    pub fn simulations(&self) -> u32 {
        self.simulations
    }
}

/// UCT value of a child under a parent visited `parent_visits` times:
/// exploitation term plus an exploration bonus that shrinks as the child
/// gets visited.
fn uct_value<G: Game>(parent_visits: u32, child: &EvalNode<G>) -> f64 {
    child.score() + UCT_EXPLORATION * (f64::from(parent_visits).ln() / f64::from(child.n)).sqrt()
}

/// Index of the UCT-best child of `node`, `None` when it has no children.
fn best_uct_child<G: Game>(node: &EvalNode<G>) -> Option<usize> {
    node.children
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            uct_value(node.n, a)
                .partial_cmp(&uct_value(node.n, b))
                .unwrap_or(Ordering::Equal)
        })
        .map(|(i, _)| i)
}

/// Walk `path` down from `root` to the node it designates.
fn node_at_mut<'a, G: Game>(root: &'a mut EvalNode<G>, path: &[usize]) -> &'a mut EvalNode<G> {
    path.iter().fold(root, |node, &i| &mut node.children[i])
}

/// Play a game to its end with uniformly random moves and report the winner.
/// A state without legal moves plays the null move, which forfeits.
pub fn play_randomly_to_end<G: Game>(mut game: G, rng: &mut fastrand::Rng) -> PlayerId {
    loop {
        if let Some(winner) = game.winner() {
            return winner;
        }
        let mv = random_move(&game, rng);
        game.play(mv.as_ref());
    }
}

/// Run `n` independent random playouts from `game` and tally the outcomes.
pub fn roll_out<G: Game>(game: &G, n: u32, rng: &mut fastrand::Rng) -> RolloutResults {
    let mut results = RolloutResults::new();
    for _ in 0..n {
        results.update(play_randomly_to_end(game.clone(), rng));
    }
    results
}

/// Monte-Carlo tree search engine for one position.
pub struct MonteCarloTreeSearch<G: Game> {
    pub root: EvalNode<G>,
    /// Number of completed search iterations.
    n_total: u32,
    rng: fastrand::Rng,
}

impl<G: Game> MonteCarloTreeSearch<G> {
    pub fn new(game: G, rng: fastrand::Rng) -> Self {
        Self {
            root: EvalNode::new(game, None),
            n_total: 0,
            rng,
        }
    }

    /// One search iteration: select a leaf by UCT, expand one untried move,
    /// roll out from the new state and propagate the results back up the
    /// selected path.
    ///
    /// Returns `true` when selection ended on a node without legal moves, in
    /// which case there is nothing left to explore down that line and the
    /// caller may stop early.
    pub fn evaluate_tree_once(&mut self) -> bool {
        // Selection: follow the best UCT child through fully expanded nodes
        let mut path = Vec::new();
        let mut node = &self.root;
        while node.untried.is_empty() && !node.children.is_empty() {
            let Some(best) = best_uct_child(node) else {
                break;
            };
            path.push(best);
            node = &node.children[best];
        }

        // A leaf without moves is fully resolved
        if node.untried.is_empty() && node.children.is_empty() {
            return true;
        }

        // Expansion: play one untried move, chosen at random
        let node = node_at_mut(&mut self.root, &path);
        let pick = self.rng.usize(..node.untried.len());
        let mv = node.untried.swap_remove(pick);
        let mut game = node.game.clone();
        game.play(Some(&mv));
        node.children.push(EvalNode::new(game, Some(mv)));
        let child = node.children.len() - 1;
        path.push(child);

        // Simulation from the new child's state
        let results = roll_out(&node.children[child].game, ROLLOUTS_PER_EXPANSION, &mut self.rng);

        // Backpropagation: every node on the path absorbs the results, so
        // ancestor statistics stay the sum of all playouts below them
        let mut node = &mut self.root;
        node.update_stats(&results);
        for &i in &path {
            node = &mut node.children[i];
            node.update_stats(&results);
        }

        self.n_total += 1;
        false
    }

    /// Search until the time budget is spent or an iteration reports there
    /// is nothing more to explore. Returns the number of iterations run.
    pub fn evaluate_tree_with_time_limit(&mut self, budget: Duration) -> u32 {
        let start = Instant::now();
        let mut iterations = 0;
        while start.elapsed() < budget {
            if self.evaluate_tree_once() {
                break;
            }
            iterations += 1;
        }
        log::debug!(
            "stopped search after {} ms and {} iterations, root stats {:.1}/{} ({:.2}% loss)",
            start.elapsed().as_millis(),
            iterations,
            self.root.w,
            self.root.n,
            100.0 * self.root.score()
        );
        iterations
    }

    /// The most promising move from the root position: the immediate child
    /// with the highest win rate. Looks one ply deep only.
    pub fn best_move(&self) -> Option<&G::Move> {
        self.root
            .children
            .iter()
            .max_by(|a, b| a.score().partial_cmp(&b.score()).unwrap_or(Ordering::Equal))
            .and_then(|child| child.mv.as_ref())
    }

    /// Human-readable summary of the tree: iteration count and the playout
    /// statistics of every move tried from the root.
    pub fn stats(&self) -> String {
        use std::fmt::Write as _;

        let mut out = String::new();
        let _ = writeln!(out, "MCTS with {} evals", self.n_total);
        for child in &self.root.children {
            if let Some(mv) = &child.mv {
                let _ = writeln!(
                    out,
                    "{} : {:.3} ({:.1}/{})",
                    mv,
                    child.score(),
                    child.w,
                    child.n
                );
            }
        }
        out
    }
}
