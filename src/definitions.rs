// stack sizes of the smallvecs used while parsing, larger inputs spill onto the heap
pub const N_NODES_ON_STACK: usize = 16;
pub const N_OPS_ON_STACK: usize = 16;
pub const N_TOKENS_ON_STACK: usize = 2 * N_NODES_ON_STACK;

// evaluating, displaying, and dropping a tree recurse once per level
pub const MAX_DEPTH: usize = 1024;
