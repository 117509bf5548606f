//! Context-sensitive memory access latency model.
//!
//! Each evaluated access is priced against the previous one: staying in the
//! open SDRAM row is cheaper than forcing a row change, sequential reads can
//! ride a burst, and the simulated single-entry TLB charges a refill penalty
//! on a tag change. The model therefore keeps one mutable [`AccessContext`]
//! per emulated core and updates it on every evaluation.
//!
//! # Cost assembly
//!
//! 1. Classify the address ([`crate::region::detect_region`]) and pick the
//!    CPU's [`MemoryTimingParameters`].
//! 2. Charge a base penalty by region kind (cached/uncached cost, dedicated
//!    on-chip costs, window wait states, or the SDRAM row-hit/row-miss
//!    cost in the main-memory window).
//! 3. With the cache disabled, replace that base with a forced line-fill
//!    cost that depends only on row locality.
//! 4. Add the misalignment charge (doubled on SH-3) and the TLB refill
//!    charge where they apply.
//! 5. Burst pricing, when enabled: the first eligible read costs the burst
//!    setup value, a continuation short-circuits to the per-CPU
//!    continuation cost.
//!
//! Burst pricing and the TLB simulation default to off in
//! [`TimingConfig`](crate::config::TimingConfig); the surrounding
//! bookkeeping runs regardless so the toggles can flip at any time.

use log::trace;

use crate::config::TimingConfig;
use crate::region::{detect_region, MemoryRegionKind};
use crate::{sh_spec, CpuVariant};

/// Per-variant memory-system latencies and wait-state configuration.
///
/// All values are additional cycles on top of the instruction's own cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryTimingParameters {
    /// Cached memory read.
    pub cached_read: u32,
    /// Cached memory write.
    pub cached_write: u32,
    /// Uncached memory read.
    pub uncached_read: u32,
    /// Uncached memory write.
    pub uncached_write: u32,
    /// On-chip RAM read.
    pub on_chip_ram_read: u32,
    /// On-chip RAM write.
    pub on_chip_ram_write: u32,
    /// On-chip register read.
    pub on_chip_reg_read: u32,
    /// On-chip register write.
    pub on_chip_reg_write: u32,
    /// Extra cycles to fill a cache line on a miss.
    pub cache_line_fill: u32,
    /// Charge on a cache miss, on top of the uncached access.
    pub cache_miss_penalty: u32,
    /// Charge for a misaligned access.
    pub unaligned_penalty: u32,
    /// First access of a burst run.
    pub burst_first_access: u32,
    /// Each later access of a burst run.
    pub burst_subsequent: u32,
    /// TLB refill charge.
    pub tlb_miss_penalty: u32,
    /// Wait states for area 0 (boot ROM / BIOS).
    pub area0_wait_states: u32,
    /// Wait states for area 1 (main memory / SDRAM).
    pub area1_wait_states: u32,
    /// Wait states for area 2 (CS2 expansion).
    pub area2_wait_states: u32,
    /// Wait states for area 3 (CS3 expansion).
    pub area3_wait_states: u32,
    /// Wait states for area 6 (CS6 peripherals).
    pub area6_wait_states: u32,
    /// SDRAM access staying in the open row.
    pub sdram_page_hit: u32,
    /// SDRAM access forcing a row change.
    pub sdram_page_miss: u32,
    /// SDRAM refresh interference charge.
    pub sdram_refresh_cycle: u32,
}

impl MemoryTimingParameters {
    /// The memory-system parameters of the selected CPU.
    pub const fn for_variant(variant: CpuVariant) -> &'static MemoryTimingParameters {
        match variant {
            CpuVariant::Sh3 => &SH3_MEMORY_TIMING,
            CpuVariant::Sh4 => &SH4_MEMORY_TIMING,
        }
    }

    /// Uncached bus cost plus an external window's wait states.
    #[inline]
    fn external(&self, is_write: bool, wait_states: u32) -> u32 {
        if is_write {
            self.uncached_write + wait_states
        } else {
            self.uncached_read + wait_states
        }
    }
}

/// SH-3 memory-system parameters (SH7709-class bus defaults).
pub const SH3_MEMORY_TIMING: MemoryTimingParameters = MemoryTimingParameters {
    cached_read: 1,
    cached_write: 1,
    uncached_read: 3,
    uncached_write: 1,
    on_chip_ram_read: 1,
    on_chip_ram_write: 1,
    on_chip_reg_read: 1,
    on_chip_reg_write: 1,
    cache_line_fill: 4,
    cache_miss_penalty: 1,
    unaligned_penalty: 1,
    burst_first_access: 2,
    burst_subsequent: 1,
    tlb_miss_penalty: 4, // simpler MMU than the SH-4
    area0_wait_states: 2,
    area1_wait_states: 0,
    area2_wait_states: 2,
    area3_wait_states: 3,
    area6_wait_states: 4, // slow peripherals
    sdram_page_hit: 1,
    sdram_page_miss: 5,
    sdram_refresh_cycle: 8,
};

/// SH-4 memory-system parameters (SH7750-class bus defaults).
pub const SH4_MEMORY_TIMING: MemoryTimingParameters = MemoryTimingParameters {
    cached_read: 0,
    cached_write: 0,
    uncached_read: 1,
    uncached_write: 0,
    on_chip_ram_read: 0,
    on_chip_ram_write: 0,
    on_chip_reg_read: 1,
    on_chip_reg_write: 1,
    cache_line_fill: 3,
    cache_miss_penalty: 1,
    unaligned_penalty: 1,
    burst_first_access: 1,
    burst_subsequent: 0,
    tlb_miss_penalty: 5, // larger UTLB, costlier refill
    area0_wait_states: 2,
    area1_wait_states: 0,
    area2_wait_states: 1,
    area3_wait_states: 2,
    area6_wait_states: 3,
    sdram_page_hit: 0,
    sdram_page_miss: 3,
    sdram_refresh_cycle: 5,
};

/// Cycles charged for a cache-bypassed access that stays in the open SDRAM
/// row.
const CACHE_BYPASS_PAGE_HIT: u32 = 6;

/// Cycles charged when the bypassed access also forces a row change.
const CACHE_BYPASS_PAGE_MISS: u32 = 15;

/// One memory reference, as seen by the timing model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryAccess {
    /// Effective address.
    pub address: u32,
    /// Access width in bytes (1, 2 or 4).
    pub size: u32,
    /// Write rather than read.
    pub is_write: bool,
    /// Instruction fetch rather than a data reference.
    pub is_code: bool,
    /// Whether the cache covers this reference (CCR state as the execution
    /// core sees it).
    pub cache_enabled: bool,
}

impl MemoryAccess {
    /// Data read with the cache enabled.
    pub fn read(address: u32, size: u32) -> Self {
        Self {
            address,
            size,
            is_write: false,
            is_code: false,
            cache_enabled: true,
        }
    }

    /// Data write with the cache enabled.
    pub fn write(address: u32, size: u32) -> Self {
        Self {
            is_write: true,
            ..Self::read(address, size)
        }
    }

    /// Mark as an instruction fetch.
    pub fn code(mut self) -> Self {
        self.is_code = true;
        self
    }

    /// Mark the cache as disabled or bypassed for this reference.
    pub fn uncached(mut self) -> Self {
        self.cache_enabled = false;
        self
    }

    /// The address is not a multiple of the access width.
    #[inline]
    pub fn is_unaligned(&self) -> bool {
        self.size > 1 && (self.address & (self.size - 1)) != 0
    }
}

/// Rolling record of the previous access. One instance per emulated core,
/// zeroed at core reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessContext {
    /// Address of the previous access.
    pub last_address: u32,
    /// Direction of the previous access.
    pub last_was_write: bool,
    /// A burst read run is open.
    pub in_burst: bool,
    /// Accesses in the current burst run.
    pub burst_len: u32,
    /// SDRAM row of the previous access.
    pub last_sdram_page: u32,
    /// The simulated single-entry TLB holds a valid translation.
    pub tlb_valid: bool,
    /// Page-granular tag of the simulated TLB entry.
    pub tlb_tag: u32,
}

impl AccessContext {
    /// Return to the power-on state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Counters accumulated by [`MemoryTiming`]. Diagnostic only: they never
/// feed back into returned cycle counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    /// Evaluated accesses.
    pub total_accesses: u64,
    /// Accesses that stayed in the open SDRAM row.
    pub page_hits: u64,
    /// Accesses that forced a row change.
    pub page_misses: u64,
    /// Reads priced as burst continuations.
    pub burst_continuations: u64,
    /// Simulated TLB refills.
    pub tlb_misses: u64,
}

/// SDRAM row index of an address.
#[inline]
pub fn sdram_page(address: u32) -> u32 {
    (address & sh_spec::PHYSICAL_ADDR_MASK) >> sh_spec::SDRAM_PAGE_SHIFT
}

/// Sequential same-direction follow-up eligible for a burst continuation:
/// the new access starts exactly where the previous one ended, and the
/// previous one did not sit in the last longword slot of its 32-byte line.
#[inline]
pub fn is_burst_continuation(address: u32, last_address: u32, size: u32) -> bool {
    last_address.wrapping_add(size) == address
        && (last_address & (sh_spec::CACHE_LINE_BYTES - 1)) != sh_spec::CACHE_LINE_LAST_SLOT
}

/// Stateful memory-latency evaluator. One instance per emulated core; the
/// execution core calls [`memory_cycles`](Self::memory_cycles) for every
/// data reference an instruction performs.
#[derive(Debug, Clone, Default)]
pub struct MemoryTiming {
    config: TimingConfig,
    ctx: AccessContext,
    stats: MemoryStats,
}

impl MemoryTiming {
    /// Model with the default configuration (burst pricing and the TLB
    /// simulation off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Model with an explicit configuration.
    pub fn with_config(config: TimingConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Inter-access context, read-only.
    pub fn context(&self) -> &AccessContext {
        &self.ctx
    }

    /// Counters since construction or the last [`reset`](Self::reset).
    pub fn stats(&self) -> MemoryStats {
        self.stats
    }

    /// Clear the context and counters, as at core reset.
    pub fn reset(&mut self) {
        self.ctx.reset();
        self.stats = MemoryStats::default();
    }

    /// Cycle penalty of one memory reference. Mutates the per-core context;
    /// total over every address, width and flag combination.
    pub fn memory_cycles(&mut self, variant: CpuVariant, access: &MemoryAccess) -> u32 {
        let region = detect_region(access.address, variant);
        let timing = MemoryTimingParameters::for_variant(variant);

        let is_unaligned = access.is_unaligned();

        // Burst runs are only considered for reads of external memory the
        // cache sees.
        let can_use_burst = self.config.burst_enabled
            && !access.is_write
            && matches!(
                region,
                MemoryRegionKind::MainMemory | MemoryRegionKind::Cached
            );
        let burst_continuation = can_use_burst
            && is_burst_continuation(access.address, self.ctx.last_address, access.size)
            && !self.ctx.last_was_write;

        // Leaving the 32-byte line or flipping direction ends any open run.
        let should_reset_burst = (access.address & sh_spec::CACHE_LINE_MASK)
            != (self.ctx.last_address & sh_spec::CACHE_LINE_MASK)
            || self.ctx.last_was_write != access.is_write;
        if should_reset_burst {
            self.ctx.in_burst = false;
            self.ctx.burst_len = 0;
        }

        // SDRAM row tracking: a hit stays in the previous row; a miss needs
        // a previously recorded access to miss against.
        let current_page = sdram_page(access.address);
        let is_page_hit = current_page == self.ctx.last_sdram_page;
        let is_page_miss = !is_page_hit && self.ctx.last_address != 0;

        // Single-entry TLB simulation; only the translatable partition can
        // miss.
        let is_tlb_hit = if self.config.tlb_model_enabled {
            self.ctx.tlb_valid
                && (access.address & sh_spec::TLB_PAGE_MASK) == self.ctx.tlb_tag
        } else {
            true
        };
        let is_tlb_miss = !is_tlb_hit && access.address < sh_spec::P1_BASE;

        let mut penalty = match region {
            MemoryRegionKind::Cached => {
                if access.cache_enabled {
                    if access.is_write {
                        timing.cached_write
                    } else {
                        timing.cached_read
                    }
                } else if access.is_write {
                    timing.uncached_write
                } else {
                    timing.uncached_read
                }
            }
            MemoryRegionKind::Uncached => {
                if access.is_write {
                    timing.uncached_write
                } else {
                    timing.uncached_read
                }
            }
            MemoryRegionKind::OnChipRam => {
                if access.is_write {
                    timing.on_chip_ram_write
                } else {
                    timing.on_chip_ram_read
                }
            }
            MemoryRegionKind::OnChipReg
            | MemoryRegionKind::CacheControl
            | MemoryRegionKind::TlbAddressArray => {
                if access.is_write {
                    timing.on_chip_reg_write
                } else {
                    timing.on_chip_reg_read
                }
            }
            // Store-queue writes retire quickly; reads drain the queue
            // first.
            MemoryRegionKind::StoreQueue => {
                if access.is_write {
                    1
                } else {
                    2
                }
            }
            MemoryRegionKind::BootRom => {
                timing.external(access.is_write, timing.area0_wait_states)
            }
            MemoryRegionKind::MainMemory => {
                if is_page_hit {
                    timing.sdram_page_hit
                } else if is_page_miss {
                    timing.sdram_page_miss
                } else {
                    timing.external(access.is_write, timing.area1_wait_states)
                }
            }
            MemoryRegionKind::Area2 => {
                timing.external(access.is_write, timing.area2_wait_states)
            }
            MemoryRegionKind::Area3 => {
                timing.external(access.is_write, timing.area3_wait_states)
            }
            MemoryRegionKind::Area6 => {
                timing.external(access.is_write, timing.area6_wait_states)
            }
        };

        // Cache off: the access behaves like a forced line fill whose cost
        // depends only on row locality, superseding the region cost.
        if !access.cache_enabled {
            penalty = if is_page_hit {
                CACHE_BYPASS_PAGE_HIT
            } else {
                CACHE_BYPASS_PAGE_MISS
            };
            penalty += 1 + timing.cache_line_fill;
        }

        if is_unaligned {
            penalty += timing.unaligned_penalty;
            // The SH-3 bus interface splits the access and pays twice.
            if matches!(variant, CpuVariant::Sh3) {
                penalty += timing.unaligned_penalty;
            }
        }

        if is_tlb_miss {
            penalty += timing.tlb_miss_penalty;
        }

        // Record this access for the next evaluation.
        self.ctx.last_address = access.address;
        self.ctx.last_was_write = access.is_write;
        self.ctx.in_burst = can_use_burst && !access.is_write;

        self.stats.total_accesses += 1;
        if is_page_hit {
            self.stats.page_hits += 1;
        } else if is_page_miss {
            self.stats.page_misses += 1;
        }
        if is_tlb_miss {
            self.stats.tlb_misses += 1;
        }

        if burst_continuation {
            // A continuation rides the open run; row and TLB tracking keep
            // the state of the access that opened it.
            self.stats.burst_continuations += 1;
            let cycles = match variant {
                CpuVariant::Sh3 => 1,
                CpuVariant::Sh4 => 0,
            };
            trace!(
                "mem {:#010x} {} burst continuation -> {} cycles",
                access.address,
                if access.is_code { "code" } else { "data" },
                cycles
            );
            return cycles;
        }

        if can_use_burst && !access.is_write {
            // First access of a potential run: charge the burst setup cost
            // instead of the assembled penalty and open the run.
            penalty = timing.burst_first_access;
            self.ctx.in_burst = true;
            self.ctx.burst_len = 1;
        }

        self.ctx.last_sdram_page = current_page;
        if is_tlb_miss {
            self.ctx.tlb_valid = true;
            self.ctx.tlb_tag = access.address & sh_spec::TLB_PAGE_MASK;
        }

        trace!(
            "mem {:#010x} {} {} size={} region={:?} -> {} cycles",
            access.address,
            if access.is_write { "write" } else { "read" },
            if access.is_code { "code" } else { "data" },
            access.size,
            region,
            penalty
        );
        penalty
    }
}
