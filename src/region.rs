//! Address-space partitioning: which kind of memory window an access hits.
//!
//! The SH-3 and SH-4 share a partitioned 32-bit address space: P0/U0 below
//! 0x8000_0000 is the translatable, cacheable window onto the external
//! areas; P1/P2 mirror the same physical space uncached; P3/P4 hold the
//! control windows (store queues, cache-control registers, the UTLB address
//! array, on-chip peripheral registers). Classification applies the ordered
//! range tests below; the order is load-bearing, since the P4 carve-out
//! claims its whole partition before the finer windows are considered.

use crate::{sh_spec, CpuVariant};

/// Kind of memory window behind an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryRegionKind {
    /// Cacheable external memory without a more specific window.
    Cached,
    /// The uncached mirror partition.
    Uncached,
    /// On-chip operand RAM.
    OnChipRam,
    /// Memory-mapped on-chip peripheral registers.
    OnChipReg,
    /// Area 0 boot ROM / BIOS window.
    BootRom,
    /// Area 1 main memory (SDRAM) window.
    MainMemory,
    /// CS2 expansion window.
    Area2,
    /// CS3 expansion window.
    Area3,
    /// CS6 peripheral window.
    Area6,
    /// Cache-control register window.
    CacheControl,
    /// Store-queue window.
    StoreQueue,
    /// UTLB address-array window.
    TlbAddressArray,
}

/// Classify an address into its memory window.
///
/// Pure and total: every 32-bit address maps to exactly one kind, with no
/// state consulted. The two parts share this layout, so `_variant` is
/// accepted only for call-site symmetry with the rest of the model.
pub fn detect_region(address: u32, _variant: CpuVariant) -> MemoryRegionKind {
    let masked = address & sh_spec::PHYSICAL_ADDR_MASK;

    // P4 control space is carved out first: the store-queue window, then
    // everything else in the partition as on-chip registers.
    if address >= sh_spec::P4_CONTROL_BASE {
        return if address <= sh_spec::STORE_QUEUE_LAST {
            MemoryRegionKind::StoreQueue
        } else {
            MemoryRegionKind::OnChipReg
        };
    }

    // On-chip RAM mirrors into every remaining partition.
    if masked >= sh_spec::ON_CHIP_RAM_BASE {
        return MemoryRegionKind::OnChipRam;
    }

    if address < sh_spec::P1_BASE {
        // P0/U0: external areas in ascending physical order.
        if masked < sh_spec::BOOT_ROM_END {
            MemoryRegionKind::BootRom
        } else if masked < sh_spec::MAIN_MEMORY_END {
            MemoryRegionKind::MainMemory
        } else if masked < sh_spec::AREA2_END {
            MemoryRegionKind::Area2
        } else if masked < sh_spec::AREA3_END {
            MemoryRegionKind::Area3
        } else if masked >= sh_spec::AREA6_BASE {
            MemoryRegionKind::Area6
        } else {
            MemoryRegionKind::Cached
        }
    } else if address < sh_spec::P3_BASE {
        // P1/P2: the uncached mirror.
        MemoryRegionKind::Uncached
    } else if (sh_spec::CACHE_CONTROL_BASE..sh_spec::CACHE_CONTROL_END).contains(&address) {
        MemoryRegionKind::CacheControl
    } else if (sh_spec::TLB_ARRAY_BASE..sh_spec::TLB_ARRAY_END).contains(&address) {
        MemoryRegionKind::TlbAddressArray
    } else {
        MemoryRegionKind::OnChipReg
    }
}
