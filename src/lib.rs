//! Cycle-timing model for SH-3 and SH-4 CPU cores.
//!
//! This crate answers one question for an instruction-execution core: *how
//! many clock cycles does this cost?* It does not decode, execute or retire
//! instructions, and it never performs the memory accesses it prices.
//!
//! Two cooperating models:
//!
//! - **Instruction cost** — [`classify`] buckets a 16-bit instruction word
//!   into a [`TimingCategory`] through an ordered mask/pattern table, and
//!   [`instruction_cycles`] prices it from per-variant base and
//!   pipeline-stall tables plus a short list of override rules.
//! - **Memory cost** — [`detect_region`] maps an address onto the SH-3/SH-4
//!   memory map, and [`MemoryTiming`] prices each reference against the
//!   previous one (SDRAM row locality, burst runs, a single-entry TLB
//!   simulation), mutating its per-core [`AccessContext`].
//!
//! The execution core owns one [`MemoryTiming`] per emulated CPU and sums
//! the two costs itself:
//!
//! ```
//! use sh34_timing::{access_width, instruction_cycles, is_memory_access};
//! use sh34_timing::{CpuVariant, MemoryAccess, MemoryTiming};
//!
//! let mut mem = MemoryTiming::new();
//! let opcode = 0x6102; // MOV.L @R0,R1
//! let mut cycles = instruction_cycles(opcode, CpuVariant::Sh4, false);
//! if is_memory_access(opcode) {
//!     let access = MemoryAccess::read(0x0C00_0000, access_width(opcode));
//!     cycles += mem.memory_cycles(CpuVariant::Sh4, &access);
//! }
//! assert_eq!(cycles, 2);
//! ```
//!
//! Every operation is total: unknown opcodes price as plain integer
//! arithmetic, and every address classifies into exactly one region. There
//! are no error paths.

pub mod access;
pub mod category;
pub mod classify;
pub mod config;
pub mod insn;
pub mod memory;
pub mod region;
pub mod sh_spec;

pub use access::{access_width, is_memory_access};
pub use category::{InsnTimings, TimingCategory, CATEGORY_COUNT};
pub use classify::classify;
pub use config::TimingConfig;
pub use insn::instruction_cycles;
pub use memory::{AccessContext, MemoryAccess, MemoryStats, MemoryTiming, MemoryTimingParameters};
pub use region::{detect_region, MemoryRegionKind};

/// One of the two modeled CPU cores.
///
/// The SH-3 is the shorter, less pipelined part with an unpipelined FPU;
/// the SH-4 adds the superscalar pipeline and the stronger memory system.
/// Both share the partitioned address space this model prices against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuVariant {
    /// SH-3 family core (SH7708/SH7709 class).
    Sh3,
    /// SH-4 family core (SH7750/SH7751 class).
    Sh4,
}
