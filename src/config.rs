/// Width and height of every board.
pub const BOARD_SIZE: u8 = 10;

/// Number of cells on a board.
pub const BOARD_CELLS: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

pub const NUM_SHIPS: usize = 3;

/// Ship lengths making up one side's fleet, placed in this order.
pub const FLEET: [usize; NUM_SHIPS] = [2, 3, 5];

/// Total number of ship segments in a fleet.
pub const TOTAL_SHIP_CELLS: usize = 2 + 3 + 5;

/// Random samples tried for a single ship before falling back to a scan.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;

/// Random samples tried for a computer shot before falling back to a scan.
pub const MAX_TARGET_ATTEMPTS: usize = 1_000;
