use domain::movement::{ChartRun, Direction, Movement};
use serde::ser::{Serialize, Serializer};

/// 附带名次变化的榜单条目。
/// is_new / rank_change / previous_rank 是 movement 的投影，不单独存储。
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedEntry<T> {
    pub entry: T,
    pub movement: Movement,
    pub run: ChartRun,
}

impl<T> EnrichedEntry<T> {
    pub fn is_new(&self) -> bool {
        self.movement.is_new()
    }

    pub fn rank_change(&self) -> Option<i64> {
        self.movement.rank_change()
    }

    pub fn previous_rank(&self) -> Option<u32> {
        self.movement.previous_rank
    }
}

#[derive(serde::Serialize)]
struct MovementView {
    direction: Direction,
    positions: u32,
    previous_rank: Option<u32>,
    weeks_on_chart: u32,
    peak_rank: u32,
}

#[derive(serde::Serialize)]
struct EnrichedView<'a, T> {
    #[serde(flatten)]
    entry: &'a T,
    movement: MovementView,
    is_new: bool,
    rank_change: Option<i64>,
    previous_rank: Option<u32>,
}

impl<T: Serialize> Serialize for EnrichedEntry<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EnrichedView {
            entry: &self.entry,
            movement: MovementView {
                direction: self.movement.direction,
                positions: self.movement.positions,
                previous_rank: self.movement.previous_rank,
                weeks_on_chart: self.run.weeks_on_chart,
                peak_rank: self.run.peak_rank,
            },
            is_new: self.is_new(),
            rank_change: self.rank_change(),
            previous_rank: self.previous_rank(),
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MovementSummary {
    pub new_entries: usize,
    pub moved_up: usize,
    pub moved_down: usize,
    pub unchanged: usize,
}

impl MovementSummary {
    pub fn record(&mut self, movement: &Movement) {
        match movement.direction {
            Direction::New => self.new_entries += 1,
            Direction::Up => self.moved_up += 1,
            Direction::Down => self.moved_down += 1,
            Direction::Same => self.unchanged += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedChart<T> {
    pub entries: Vec<EnrichedEntry<T>>,
    pub summary: MovementSummary,
}
