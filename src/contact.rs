// Contact form submission. The form relay is a third-party endpoint that
// accepts a url-encoded POST; any 2xx counts as delivered and everything
// else, including a failed fetch or a rejected field, is a plain error.

use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{console, Headers, Request, RequestInit, Response, UrlSearchParams};

pub const DEFAULT_ENDPOINT: &str = "https://formspree.io/f/manogken";

#[wasm_bindgen]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContactStatus {
    Idle,
    Sending,
    Success,
    Error,
}

impl ContactStatus {
    /// Moves into `Sending`, unless a submission is already in flight.
    pub fn begin(self) -> Result<ContactStatus, ContactError> {
        match self {
            ContactStatus::Sending => Err(ContactError::Busy),
            _ => Ok(ContactStatus::Sending),
        }
    }

    /// Final status for a response code, `None` meaning the request never
    /// produced a response.
    pub fn settle(response_status: Option<u16>) -> ContactStatus {
        match response_status {
            Some(code) if (200..300).contains(&code) => ContactStatus::Success,
            _ => ContactStatus::Error,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactStatus::Idle => "idle",
            ContactStatus::Sending => "sending",
            ContactStatus::Success => "success",
            ContactStatus::Error => "error",
        }
    }

    /// Banner shown above the form, if any.
    pub fn message(self) -> Option<&'static str> {
        match self {
            ContactStatus::Success => Some("Thanks for your message! I'll get back to you soon."),
            ContactStatus::Error => Some("Oops! Something went wrong. Please try again."),
            _ => None,
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            ContactStatus::Sending => "Sending...",
            _ => "Send Message",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("the {0} field is required")]
    MissingField(&'static str),
    #[error("`{0}` is not an email address")]
    InvalidEmail(String),
    #[error("a message is already being sent")]
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Trims every field and checks that none is empty and the email at
    /// least looks like `local@domain`.
    pub fn new(name: &str, email: &str, message: &str) -> Result<ContactMessage, ContactError> {
        let name = required("name", name)?;
        let email = required("email", email)?;
        let message = required("message", message)?;
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(ContactError::InvalidEmail(email)),
        }
        Ok(ContactMessage {
            name,
            email,
            message,
        })
    }

    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("message", self.message.as_str()),
        ]
    }

    /// `application/x-www-form-urlencoded` body.
    pub fn form_body(&self) -> Result<String, JsValue> {
        let params = UrlSearchParams::new()?;
        for (key, value) in self.fields().iter() {
            params.append(key, value);
        }
        Ok(params.to_string().into())
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ContactError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ContactError::MissingField(field))
    } else {
        Ok(value.to_owned())
    }
}

async fn post_form(endpoint: &str, body: &str) -> Result<u16, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

    let headers = Headers::new()?;
    headers.set("Accept", "application/json")?;
    headers.set("Content-Type", "application/x-www-form-urlencoded")?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(endpoint, &init)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    Ok(response.status())
}

#[wasm_bindgen]
pub struct ContactForm {
    endpoint: String,
    status: Rc<Cell<ContactStatus>>,
}

impl Default for ContactForm {
    fn default() -> Self {
        ContactForm::new()
    }
}

#[wasm_bindgen]
impl ContactForm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ContactForm {
        ContactForm::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> ContactForm {
        ContactForm {
            endpoint: endpoint.to_owned(),
            status: Rc::new(Cell::new(ContactStatus::Idle)),
        }
    }

    pub fn status(&self) -> ContactStatus {
        self.status.get()
    }

    pub fn status_label(&self) -> String {
        self.status.get().label().to_owned()
    }

    pub fn message(&self) -> Option<String> {
        self.status.get().message().map(str::to_owned)
    }

    pub fn button_label(&self) -> String {
        self.status.get().button_label().to_owned()
    }

    /// Whether the submit button should be disabled.
    pub fn is_busy(&self) -> bool {
        self.status.get() == ContactStatus::Sending
    }

    /// Sends the form. The status flips to `sending` immediately; the
    /// returned promise resolves with the final status label. A second
    /// submit while one is in flight is rejected.
    pub fn submit(&self, name: &str, email: &str, message: &str) -> Result<js_sys::Promise, JsValue> {
        let sending = self
            .status
            .get()
            .begin()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.status.set(sending);

        let status = self.status.clone();
        let endpoint = self.endpoint.clone();
        let message = ContactMessage::new(name, email, message);
        Ok(future_to_promise(async move {
            let outcome = match message {
                Ok(message) => match message.form_body() {
                    Ok(body) => post_form(&endpoint, &body).await.map_err(|err| {
                        console::error_2(&"contact form: request failed".into(), &err);
                    }),
                    Err(err) => {
                        console::error_1(&err);
                        Err(())
                    }
                },
                Err(err) => {
                    console::warn_1(&format!("contact form: {}", err).into());
                    Err(())
                }
            };
            let settled = ContactStatus::settle(outcome.ok());
            status.set(settled);
            Ok(JsValue::from_str(settled.label()))
        }))
    }

    /// Back to `idle`, e.g. once the banner has been dismissed.
    pub fn reset(&self) {
        if self.status.get() != ContactStatus::Sending {
            self.status.set(ContactStatus::Idle);
        }
    }
}
