//! C ABI entry points.
//!
//! Each function:
//! 1. Wraps its body in `catch_unwind`
//! 2. Validates pointers and UTF-8 at the boundary
//! 3. Delegates to this thread's `Lrud`
//! 4. Returns a status code: `0` ok, `-1` error (see `lrud_get_last_error`),
//!    `-2` panic
//!
//! Strings come in as `(ptr, len)` UTF-8 pairs. Strings going out are copied
//! into caller buffers, NUL-terminated when there is room, and the number of
//! bytes copied is returned. Notifications queue up and are drained as JSON
//! with `lrud_next_event`.

// Raw-pointer arguments are part of the C contract; null checks happen
// before any dereference.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::config::LrudConfig;
use crate::context::{
    clear_last_error, destroy_context, init_context, last_error_ptr, set_last_error, with_context,
};
use crate::error::{LrudError, Result};
use crate::node::{NodeOptions, NodeProps};

// ============================================================================
// Boundary helpers
// ============================================================================

fn ffi_wrap(f: impl FnOnce() -> Result<i32>) -> i32 {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(code)) => code,
        Ok(Err(err)) => {
            set_last_error(err.to_string());
            -1
        }
        Err(_) => {
            set_last_error("internal panic".to_string());
            -2
        }
    }
}

/// Borrow a `(ptr, len)` pair as UTF-8. Null or zero-length is `None`.
fn read_str<'a>(ptr: *const u8, len: u32, name: &'static str) -> Result<Option<&'a str>> {
    if ptr.is_null() || len == 0 {
        return Ok(None);
    }
    let slice = unsafe { std::slice::from_raw_parts(ptr, len as usize) };
    std::str::from_utf8(slice)
        .map(Some)
        .map_err(|_| LrudError::InvalidUtf8(name))
}

fn require_str<'a>(ptr: *const u8, len: u32, name: &'static str) -> Result<&'a str> {
    read_str(ptr, len, name)?.ok_or(LrudError::NullPointer(name))
}

fn write_bytes(bytes: &[u8], buffer: *mut u8, buffer_len: u32) -> i32 {
    let copy_len = bytes.len().min(buffer_len as usize);
    if buffer.is_null() {
        return 0;
    }
    if copy_len > 0 {
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), buffer, copy_len);
        }
    }
    // Null-terminate if space
    if (buffer_len as usize) > copy_len {
        unsafe {
            *buffer.add(copy_len) = 0;
        }
    }
    copy_len as i32
}

/// Copy all of `bytes` or fail, so outputs are never cut short.
fn write_all(bytes: &[u8], buffer: *mut u8, buffer_len: u32, what: &str) -> Result<i32> {
    if buffer.is_null() || bytes.len() > buffer_len as usize {
        return Err(LrudError::InvalidArgument(format!(
            "{what} buffer too small: need {} bytes",
            bytes.len()
        )));
    }
    Ok(write_bytes(bytes, buffer, buffer_len))
}

// ============================================================================
// Lifecycle
// ============================================================================

#[no_mangle]
pub extern "C" fn lrud_init() -> i32 {
    ffi_wrap(|| {
        init_context(LrudConfig::default())?;
        Ok(0)
    })
}

/// Initialize with a JSON `LrudConfig`.
#[no_mangle]
pub extern "C" fn lrud_init_with_config(ptr: *const u8, len: u32) -> i32 {
    ffi_wrap(|| {
        let config = match read_str(ptr, len, "config")? {
            Some(json) => LrudConfig::from_json(json)?,
            None => LrudConfig::default(),
        };
        init_context(config)?;
        Ok(0)
    })
}

#[no_mangle]
pub extern "C" fn lrud_shutdown() -> i32 {
    ffi_wrap(|| {
        destroy_context();
        Ok(0)
    })
}

/// Clear every node, the focus and pending events, keeping the configuration.
#[no_mangle]
pub extern "C" fn lrud_destroy() -> i32 {
    ffi_wrap(|| {
        with_context(|ctx| {
            ctx.reset();
            Ok(0)
        })
    })
}

// ============================================================================
// Registry
// ============================================================================

/// Register or update a node. `props` is an optional JSON `NodeProps` object.
#[no_mangle]
pub extern "C" fn lrud_register(
    id_ptr: *const u8,
    id_len: u32,
    props_ptr: *const u8,
    props_len: u32,
) -> i32 {
    ffi_wrap(|| {
        let id = read_str(id_ptr, id_len, "id")?.unwrap_or_default();
        let props: NodeProps = match read_str(props_ptr, props_len, "props")? {
            Some(json) => serde_json::from_str(json).map_err(LrudError::Props)?,
            None => NodeProps::default(),
        };
        with_context(|ctx| {
            ctx.lrud.register(id, NodeOptions::from(props))?;
            Ok(0)
        })
    })
}

#[no_mangle]
pub extern "C" fn lrud_unregister(id_ptr: *const u8, id_len: u32) -> i32 {
    ffi_wrap(|| {
        let id = require_str(id_ptr, id_len, "id")?;
        with_context(|ctx| {
            ctx.lrud.unregister(id);
            Ok(0)
        })
    })
}

#[no_mangle]
pub extern "C" fn lrud_get_node_count() -> u32 {
    catch_unwind(AssertUnwindSafe(|| -> u32 {
        with_context(|ctx| Ok(ctx.lrud.node_count() as u32)).unwrap_or(0)
    }))
    .unwrap_or_default()
}

/// Copy the JSON snapshot of a node into `buffer`.
#[no_mangle]
pub extern "C" fn lrud_get_node(
    id_ptr: *const u8,
    id_len: u32,
    buffer: *mut u8,
    buffer_len: u32,
) -> i32 {
    ffi_wrap(|| {
        let id = require_str(id_ptr, id_len, "id")?;
        let json = with_context(|ctx| {
            let node = ctx
                .lrud
                .get_node_by_id(id)
                .ok_or_else(|| LrudError::InvalidArgument(format!("unknown node `{id}`")))?;
            Ok(serde_json::to_string(&node.snapshot())?)
        })?;
        write_all(json.as_bytes(), buffer, buffer_len, "node")
    })
}

// ============================================================================
// Focus & Active Children
// ============================================================================

/// Focus a node; a null id focuses the current focus or the root.
#[no_mangle]
pub extern "C" fn lrud_focus(id_ptr: *const u8, id_len: u32) -> i32 {
    ffi_wrap(|| {
        let id = read_str(id_ptr, id_len, "id")?;
        with_context(|ctx| {
            ctx.lrud.focus(id);
            Ok(0)
        })
    })
}

#[no_mangle]
pub extern "C" fn lrud_blur(id_ptr: *const u8, id_len: u32) -> i32 {
    ffi_wrap(|| {
        let id = read_str(id_ptr, id_len, "id")?;
        with_context(|ctx| {
            ctx.lrud.blur(id);
            Ok(0)
        })
    })
}

/// Copy the focused id into `buffer`. Returns 0 when nothing is focused and
/// -1 when the id does not fit.
#[no_mangle]
pub extern "C" fn lrud_get_focused(buffer: *mut u8, buffer_len: u32) -> i32 {
    ffi_wrap(|| {
        with_context(|ctx| match ctx.lrud.focused_id() {
            Some(id) => write_all(id.as_bytes(), buffer, buffer_len, "focus"),
            None => Ok(0),
        })
    })
}

#[no_mangle]
pub extern "C" fn lrud_set_active_child(
    id_ptr: *const u8,
    id_len: u32,
    child_ptr: *const u8,
    child_len: u32,
) -> i32 {
    ffi_wrap(|| {
        let id = require_str(id_ptr, id_len, "id")?;
        let child = require_str(child_ptr, child_len, "child")?;
        with_context(|ctx| {
            ctx.lrud.set_active_child(id, child);
            Ok(0)
        })
    })
}

#[no_mangle]
pub extern "C" fn lrud_set_active_index(id_ptr: *const u8, id_len: u32, index: u32) -> i32 {
    ffi_wrap(|| {
        let id = require_str(id_ptr, id_len, "id")?;
        with_context(|ctx| {
            ctx.lrud.set_active_index(id, index as usize);
            Ok(0)
        })
    })
}

// ============================================================================
// Input & Events
// ============================================================================

/// Route a raw key code. Returns 1 if consumed, 0 if it bubbled past the root.
#[no_mangle]
pub extern "C" fn lrud_handle_key_event(code: u32) -> i32 {
    ffi_wrap(|| with_context(|ctx| Ok(i32::from(ctx.lrud.handle_key_event(code)))))
}

/// Pop the oldest pending notification into `buffer` as JSON.
///
/// Returns the byte length written, or 0 when the queue is empty. If the
/// buffer is too small the event stays queued and -1 is returned.
#[no_mangle]
pub extern "C" fn lrud_next_event(buffer: *mut u8, buffer_len: u32) -> i32 {
    ffi_wrap(|| {
        with_context(|ctx| {
            let mut queue = ctx.events.borrow_mut();
            let Some(event) = queue.front() else {
                return Ok(0);
            };
            let json = serde_json::to_string(event)?;
            let written = write_all(json.as_bytes(), buffer, buffer_len, "event")?;
            queue.pop_front();
            Ok(written)
        })
    })
}

#[no_mangle]
pub extern "C" fn lrud_pending_events() -> u32 {
    catch_unwind(AssertUnwindSafe(|| -> u32 {
        with_context(|ctx| Ok(ctx.events.borrow().len() as u32)).unwrap_or(0)
    }))
    .unwrap_or_default()
}

// ============================================================================
// Diagnostics
// ============================================================================

#[no_mangle]
pub extern "C" fn lrud_get_last_error() -> *const std::os::raw::c_char {
    catch_unwind(last_error_ptr).unwrap_or(std::ptr::null())
}

#[no_mangle]
pub extern "C" fn lrud_clear_error() {
    let _ = catch_unwind(clear_last_error);
}
