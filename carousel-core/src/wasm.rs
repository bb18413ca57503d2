//! WebAssembly bindings for carousel-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.

use wasm_bindgen::prelude::*;

use crate::{CarouselConfig, CarouselEngine, Command, CommandQueue, EventKind, Item};

/// Initialize the carousel WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Carousel instance for WASM.
#[wasm_bindgen]
pub struct WasmCarousel {
    engine: CarouselEngine,
    queue: CommandQueue,
}

/// Deferred command channel for JS callbacks.
///
/// A callback registered with `on` runs while the carousel is borrowed, so it
/// cannot call the carousel. It pushes onto this queue instead; the carousel
/// drains it when the current call returns.
#[wasm_bindgen]
pub struct WasmCommandQueue {
    queue: CommandQueue,
}

#[wasm_bindgen]
impl WasmCommandQueue {
    /// Queue a command given as JSON, e.g. `{"type":"ReverseRotation"}`.
    ///
    /// # Errors
    ///
    /// Returns an error string if parsing fails.
    #[wasm_bindgen(js_name = push)]
    pub fn push(&self, json: &str) -> Result<(), String> {
        let command: Command = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.queue.push(command);
        Ok(())
    }

    /// Number of commands waiting.
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn length(&self) -> usize {
        self.queue.len()
    }
}

#[wasm_bindgen]
impl WasmCarousel {
    /// Create a new carousel for a container of the given size.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            engine: CarouselEngine::new(width, height),
            queue: CommandQueue::new(),
        }
    }

    /// Handle for callbacks to defer commands through.
    #[wasm_bindgen(js_name = commandQueue)]
    #[must_use]
    pub fn command_queue(&self) -> WasmCommandQueue {
        WasmCommandQueue {
            queue: self.queue.clone(),
        }
    }

    /// Apply deferred commands; the first rejection is reported.
    fn flush(&mut self) -> Result<(), String> {
        match self.engine.apply_queued(&self.queue).into_iter().next() {
            Some((_, e)) => Err(e.to_string()),
            None => Ok(()),
        }
    }

    /// Replace the configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if parsing or validation fails.
    #[wasm_bindgen(js_name = configure)]
    pub fn configure(&mut self, json: &str) -> Result<(), String> {
        let config = CarouselConfig::from_json(json).map_err(|e| e.to_string())?;
        self.engine.configure(config).map_err(|e| e.to_string())
    }

    /// Replace the item set from a JSON array of `{id, width, height}`.
    ///
    /// # Errors
    ///
    /// Returns an error string if JSON parsing fails.
    #[wasm_bindgen(js_name = registerItems)]
    pub fn register_items(&mut self, json: &str) -> Result<(), String> {
        let items: Vec<Item> = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.engine.register_items(items);
        Ok(())
    }

    /// Append an item of the given size and return its handle as a string.
    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(&mut self, width: f64, height: f64) -> String {
        let item = Item::new(width, height);
        self.engine.add_item(item);
        item.id.to_string()
    }

    /// Remove every item.
    #[wasm_bindgen(js_name = clear)]
    pub fn clear(&mut self) {
        self.engine.clear();
    }

    /// Advance one frame and return the poses as JSON.
    #[wasm_bindgen(js_name = tick)]
    ///
    /// Deferred commands are applied before and after the frame; rejected
    /// ones are logged.
    pub fn tick(&mut self) -> String {
        self.engine.apply_queued(&self.queue);
        self.engine.tick();
        self.engine.apply_queued(&self.queue);
        serde_json::to_string(self.engine.poses()).unwrap_or_default()
    }

    /// Apply a command given as JSON, e.g. `{"type":"Next"}`.
    ///
    /// # Errors
    ///
    /// Returns an error string if parsing fails or the command is rejected.
    #[wasm_bindgen(js_name = apply)]
    pub fn apply(&mut self, json: &str) -> Result<(), String> {
        let command: Command = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.engine.apply(&command).map_err(|e| e.to_string())?;
        self.flush()
    }

    /// Select the item in a slot.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown slot.
    #[wasm_bindgen(js_name = select)]
    pub fn select(&mut self, slot: usize, animate: bool) -> Result<(), String> {
        self.engine.select(slot, animate).map_err(|e| e.to_string())?;
        self.flush()
    }

    /// Select the next item.
    ///
    /// # Errors
    ///
    /// Returns an error string if the selection fails.
    #[wasm_bindgen(js_name = next)]
    pub fn next(&mut self) -> Result<(), String> {
        self.engine.next().map_err(|e| e.to_string())?;
        self.flush()
    }

    /// Select the previous item.
    ///
    /// # Errors
    ///
    /// Returns an error string if the selection fails.
    #[wasm_bindgen(js_name = previous)]
    pub fn previous(&mut self) -> Result<(), String> {
        self.engine.previous().map_err(|e| e.to_string())?;
        self.flush()
    }

    /// Switch auto-rotation on or off.
    ///
    /// # Errors
    ///
    /// Returns an error string when the rotation speed is zero.
    #[wasm_bindgen(js_name = enableRotation)]
    pub fn enable_rotation(&mut self, enable: bool) -> Result<(), String> {
        self.engine.enable_rotation(enable).map_err(|e| e.to_string())
    }

    /// Change the container size.
    ///
    /// # Errors
    ///
    /// Returns an error string for an invalid size.
    #[wasm_bindgen(js_name = resize)]
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), String> {
        self.engine.resize(width, height).map_err(|e| e.to_string())
    }

    /// Register a JS callback for `"selecting"`, `"selected"` or `"deselected"`.
    ///
    /// The callback receives the item handle as a string. It must not call
    /// back into this carousel; push follow-up commands onto
    /// [`commandQueue`](Self::command_queue) instead, for example
    /// `queue.push('{"type":"ReverseRotation"}')` on `"selecting"`.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown event name.
    #[wasm_bindgen(js_name = on)]
    pub fn on(&mut self, event: &str, callback: js_sys::Function) -> Result<(), String> {
        let kind = match event {
            "selecting" => EventKind::Selecting,
            "selected" => EventKind::Selected,
            "deselected" => EventKind::Deselected,
            other => return Err(format!("unknown event '{other}'")),
        };
        self.engine.subscribe(kind, move |e| {
            let id = JsValue::from_str(&e.item().to_string());
            if let Err(err) = callback.call1(&JsValue::NULL, &id) {
                tracing::warn!("Carousel callback failed: {err:?}");
            }
        });
        Ok(())
    }

    /// Slot of the current selection.
    #[wasm_bindgen(js_name = currentSlot)]
    #[must_use]
    pub fn current_slot(&self) -> usize {
        self.engine.current_slot()
    }
}
