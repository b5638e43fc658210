//! Persistent boot counter.
//!
//! Uses the nRF52840's internal flash via the `sequential-storage` crate to
//! keep a count of cold boots across deep-sleep cycles. Diagnostics only:
//! the interaction never depends on it, and a flash failure just restarts
//! the count.
//!
//! Storage layout:
//!   - One little-endian u32 record under a fixed map key.
//!   - Records are appended sequentially; the flash pages are managed by
//!     `sequential-storage` which handles wear levelling and GC.

use crate::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use defmt::error;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Key for the boot counter in the map storage.
const KEY_BOOT_COUNT: u8 = 0x01;

/// Scratch size for sequential-storage item (de)serialization.
const BUF_SIZE: usize = 32;

/// Read the stored boot count, increment it, write it back, and return the
/// new value. Any flash error is logged and the count restarts from 1.
pub async fn increment_boot_count(
    flash: &mut impl embedded_storage_async::nor_flash::NorFlash,
) -> u32 {
    let flash_range = STORAGE_START..STORAGE_END;
    let mut buf = [0u8; BUF_SIZE];

    let previous = match fetch_item::<u8, &[u8], _>(
        flash,
        flash_range.clone(),
        &mut NoCache::new(),
        &mut buf,
        &KEY_BOOT_COUNT,
    )
    .await
    {
        Ok(Some(data)) if data.len() >= 4 => {
            u32::from_le_bytes([data[0], data[1], data[2], data[3]])
        }
        Ok(_) => 0,
        Err(e) => {
            error!("Boot counter read failed: {:?}", defmt::Debug2Format(&e));
            0
        }
    };

    let count = previous.wrapping_add(1);
    let record = count.to_le_bytes();
    let item: &[u8] = &record;

    if let Err(e) = store_item::<u8, &[u8], _>(
        flash,
        flash_range,
        &mut NoCache::new(),
        &mut buf,
        &KEY_BOOT_COUNT,
        &item,
    )
    .await
    {
        error!("Boot counter write failed: {:?}", defmt::Debug2Format(&e));
    }

    count
}
