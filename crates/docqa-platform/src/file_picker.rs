//! Native file chooser backed by a hidden `<input type="file">`.
//!
//! Opening the dialog returns immediately; the chosen file is read into
//! memory in the background and parked in a slot the UI polls each frame.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};

use docqa_types::{ClientError, Result, http::UploadFile};

pub struct FilePicker {
    input: HtmlInputElement,
    slot: Rc<RefCell<Option<UploadFile>>>,
    reading: Rc<RefCell<bool>>,
    onchange: Closure<dyn FnMut(Event)>,
}

fn js_err(e: JsValue) -> ClientError {
    ClientError::JsInterop(format!("{:?}", e))
}

async fn read_file(file: File) -> Result<UploadFile> {
    let buf = JsFuture::from(file.array_buffer()).await.map_err(js_err)?;
    Ok(UploadFile {
        name: file.name(),
        mime_type: file.type_(),
        bytes: Uint8Array::new(&buf).to_vec(),
    })
}

impl FilePicker {
    /// `accept` is the input's accept list, e.g. `".pdf,.docx"`.
    /// `notify` runs once a file has been read (typically a repaint request).
    pub fn new(accept: &str, notify: impl Fn() + 'static) -> Result<Self> {
        let input: HtmlInputElement = gloo_utils::document()
            .create_element("input")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| ClientError::JsInterop("created element is not an input".to_string()))?;
        input.set_type("file");
        input.set_accept(accept);
        input.set_hidden(true);
        gloo_utils::body().append_child(&input).map_err(js_err)?;

        let slot: Rc<RefCell<Option<UploadFile>>> = Rc::new(RefCell::new(None));
        let reading = Rc::new(RefCell::new(false));
        let notify = Rc::new(notify);

        let input_clone = input.clone();
        let slot_clone = slot.clone();
        let reading_clone = reading.clone();
        let onchange = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let file = match input_clone.files().and_then(|files| files.get(0)) {
                Some(f) => f,
                None => return,
            };
            // Reset so choosing the same file again still fires `change`.
            input_clone.set_value("");

            let slot = slot_clone.clone();
            let reading = reading_clone.clone();
            let notify = notify.clone();
            *reading.borrow_mut() = true;
            wasm_bindgen_futures::spawn_local(async move {
                match read_file(file).await {
                    Ok(upload) => {
                        log::info!("Picked {} ({})", upload.name, upload.size_label());
                        *slot.borrow_mut() = Some(upload);
                    }
                    Err(e) => log::error!("Failed to read picked file: {}", e),
                }
                *reading.borrow_mut() = false;
                notify();
            });
        });
        input
            .add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())
            .map_err(js_err)?;

        Ok(Self { input, slot, reading, onchange })
    }

    /// Show the browser's file dialog.
    pub fn open(&self) {
        self.input.click();
    }

    /// A file finished reading since the last call.
    pub fn take(&self) -> Option<UploadFile> {
        self.slot.borrow_mut().take()
    }

    pub fn is_reading(&self) -> bool {
        *self.reading.borrow()
    }
}

impl Drop for FilePicker {
    fn drop(&mut self) {
        let _ = self
            .input
            .remove_event_listener_with_callback("change", self.onchange.as_ref().unchecked_ref());
        self.input.remove();
    }
}
