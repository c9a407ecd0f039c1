//! [`HostForm`] for creating a new listing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{money::Currency, Money};
use rust_decimal::Decimal;
use tracing as log;

use crate::{
    effect::{
        Effect, HostListingRequest, ListingKind, Notification, Request,
        RequestError,
    },
    route::Route,
    session::Session,
};

/// Form collecting a new listing from a host.
///
/// Exactly one of the [`View`]s is rendered at any time; the variants make
/// the lifecycle explicit instead of relying on an ordering of boolean
/// flags.
#[derive(Debug)]
pub enum HostForm {
    /// The viewer is absent or has no linked wallet; only a sign-in or
    /// connect prompt is shown.
    Gate,

    /// The editable form.
    Form {
        /// Current [`Draft`].
        draft: Draft,

        /// Indicator whether an image upload is in flight.
        uploading: bool,
    },

    /// The creation request is in flight.
    Submitting {
        /// [`Draft`] being submitted, kept to restore the form on failure.
        draft: Draft,
    },

    /// The listing has been created; the view is a pure redirect to it.
    Created {
        /// ID of the created listing.
        id: String,
    },
}

/// Not-yet-submitted listing being drafted by the host.
///
/// The address is drafted as four discrete parts; they are concatenated on
/// submit and never reach the wire separately. The price is drafted in
/// major currency units and converted on submit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    /// Kind of the listing.
    pub kind: Option<ListingKind>,

    /// Maximum number of guests.
    pub num_of_guests: Option<u16>,

    /// Title of the listing.
    pub title: String,

    /// Description of the listing.
    pub description: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// State.
    pub state: String,

    /// Postal code.
    pub postal_code: String,

    /// Image of the listing, as a base64 `data:` URL.
    pub image: Option<String>,

    /// Price per day, in major currency units.
    pub price: Option<Decimal>,
}

impl Draft {
    /// Builds the creation request out of this [`Draft`].
    ///
    /// Returns [`None`] if any required field is missing or invalid.
    fn to_request(&self) -> Option<HostListingRequest> {
        let parts = [
            self.address.trim(),
            self.city.trim(),
            self.state.trim(),
            self.postal_code.trim(),
        ];
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() || description.is_empty() {
            return None;
        }

        let price = Money::from_major(self.price?, Currency::Usd)?;

        Some(HostListingRequest {
            kind: self.kind?,
            num_of_guests: self.num_of_guests.filter(|n| *n > 0)?,
            title: title.to_owned(),
            description: description.to_owned(),
            address: parts.join(", "),
            image: self.image.clone()?,
            price: price.minor,
        })
    }
}

/// Maximum size of an uploaded image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 1024 * 1024;

/// Event of the image upload control.
#[derive(Clone, Debug)]
pub enum UploadEvent {
    /// An upload has started.
    Started,

    /// An upload has completed with the provided file.
    Done(UploadFile),
}

/// File handed over by the upload control.
#[derive(Clone, Debug)]
pub struct UploadFile {
    /// MIME type of the file.
    pub mime: String,

    /// Raw bytes of the file.
    pub bytes: Vec<u8>,
}

impl HostForm {
    /// Creates a new [`HostForm`] for the provided [`Session`].
    ///
    /// A viewer without an identity or a linked wallet lands on the
    /// [`HostForm::Gate`].
    #[must_use]
    pub fn mount(session: &Session) -> Self {
        let viewer = session.viewer();
        if viewer.id.is_none() || !viewer.has_wallet {
            Self::Gate
        } else {
            Self::Form {
                draft: Draft::default(),
                uploading: false,
            }
        }
    }

    /// Returns the mutable [`Draft`], if the form is editable.
    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        if let Self::Form { draft, .. } = self {
            Some(draft)
        } else {
            None
        }
    }

    /// Feeds an image [`UploadEvent`] into the form.
    ///
    /// Files other than a JPEG or PNG under 1 MiB are rejected with a
    /// notification, leaving all state untouched. An accepted file is
    /// stored as its base64 `data:` URL encoding.
    #[must_use]
    pub fn upload(&mut self, event: UploadEvent) -> Vec<Effect> {
        let Self::Form { draft, uploading } = self else {
            return Vec::new();
        };

        match event {
            UploadEvent::Started => {
                *uploading = true;
                Vec::new()
            }
            UploadEvent::Done(file) => {
                // The upload has concluded either way, so the in-flight
                // indicator clears even when the file is rejected. Only
                // the draft stays untouched on rejection.
                *uploading = false;
                if file.mime != "image/jpeg" && file.mime != "image/png" {
                    return vec![Effect::Notify(Notification::Error(
                        "You're only able to upload valid JPG or PNG files!"
                            .to_owned(),
                    ))];
                }
                if file.bytes.len() >= MAX_IMAGE_BYTES {
                    return vec![Effect::Notify(Notification::Error(
                        "You're only able to upload valid image files of \
                         under 1MB in size!"
                            .to_owned(),
                    ))];
                }

                draft.image = Some(format!(
                    "data:{};base64,{}",
                    file.mime,
                    STANDARD.encode(&file.bytes),
                ));
                Vec::new()
            }
        }
    }

    /// Submits the current [`Draft`].
    ///
    /// A valid draft yields exactly one creation request; an incomplete one
    /// yields a single aggregate notification and keeps the form editable.
    #[must_use]
    pub fn submit(&mut self) -> Vec<Effect> {
        let Self::Form { draft, .. } = self else {
            return Vec::new();
        };

        if let Some(request) = draft.to_request() {
            log::debug!(title = %request.title, "submitting new listing");
            let draft = std::mem::take(draft);
            *self = Self::Submitting { draft };
            vec![Effect::Request(Request::HostListing(request))]
        } else {
            vec![Effect::Notify(Notification::Error(
                "Please complete all required form fields!".to_owned(),
            ))]
        }
    }

    /// Applies the outcome of the creation request.
    ///
    /// Success turns the view into a redirect to the created listing;
    /// failure notifies and returns to the editable form with the draft
    /// intact.
    #[must_use]
    pub fn finished(
        &mut self,
        outcome: Result<String, RequestError>,
    ) -> Vec<Effect> {
        let Self::Submitting { draft } = self else {
            return Vec::new();
        };

        match outcome {
            Ok(id) => {
                *self = Self::Created { id };
                Vec::new()
            }
            Err(e) => {
                log::debug!("listing creation failed: {e}");
                let draft = std::mem::take(draft);
                *self = Self::Form {
                    draft,
                    uploading: false,
                };
                vec![Effect::Notify(Notification::Error(
                    "Sorry! We weren't able to create your listing. Please \
                     try again later."
                        .to_owned(),
                ))]
            }
        }
    }

    /// Returns the [`View`] to render.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        match self {
            Self::Gate => View::Gate,
            Self::Submitting { .. } => View::Submitting,
            Self::Created { id } => {
                View::Redirect(Route::Listing { id: id.clone() })
            }
            Self::Form { draft, uploading } => View::Form {
                draft,
                uploading: *uploading,
            },
        }
    }
}

/// Mutually exclusive renderings of a [`HostForm`].
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    /// Sign-in or wallet-connect prompt.
    Gate,

    /// Waiting indicator while the creation request is in flight.
    Submitting,

    /// Pure redirect to the created listing.
    Redirect(Route),

    /// The editable form.
    Form {
        /// Current [`Draft`].
        draft: &'a Draft,

        /// Indicator whether an image upload is in flight.
        uploading: bool,
    },
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::{
        effect::{Effect, ListingKind, Notification, Request, RequestError},
        route::Route,
        session::{Session, Viewer},
    };

    use super::{Draft, HostForm, UploadEvent, UploadFile, View};

    fn session(has_wallet: bool) -> Session {
        Session::new(Viewer {
            id: Some("u1".to_owned()),
            avatar: None,
            has_wallet,
            did_request: true,
        })
    }

    fn valid_draft() -> Draft {
        Draft {
            kind: Some(ListingKind::House),
            num_of_guests: Some(4),
            title: "Beverly Hills mansion".to_owned(),
            description: "An iconic and luxurious mansion.".to_owned(),
            address: "251 North Bristol Avenue".to_owned(),
            city: "Los Angeles".to_owned(),
            state: "California".to_owned(),
            postal_code: "90210".to_owned(),
            image: Some("data:image/png;base64,iVBORw0KGgo=".to_owned()),
            price: Some(Decimal::from(120)),
        }
    }

    fn editable_with(draft: Draft) -> HostForm {
        let mut form = HostForm::mount(&session(true));
        *form.draft_mut().unwrap() = draft;
        form
    }

    #[test]
    fn gated_without_a_wallet() {
        assert_eq!(HostForm::mount(&session(false)).view(), View::Gate);
        assert_eq!(HostForm::mount(&Session::default()).view(), View::Gate);
    }

    #[test]
    fn submit_concatenates_address_and_converts_price() {
        let mut form = editable_with(valid_draft());

        let effects = form.submit();

        assert_eq!(effects.len(), 1);
        let Effect::Request(Request::HostListing(request)) = &effects[0]
        else {
            panic!("expected a creation request");
        };
        assert_eq!(request.price, 12000);
        assert_eq!(
            request.address,
            "251 North Bristol Avenue, Los Angeles, California, 90210",
        );
    }

    #[test]
    fn payload_has_no_discrete_address_parts() {
        let mut form = editable_with(valid_draft());

        let effects = form.submit();
        let Effect::Request(Request::HostListing(request)) = &effects[0]
        else {
            panic!("expected a creation request");
        };

        let value = serde_json::to_value(request).unwrap();
        let keys = value.as_object().unwrap();
        assert!(keys.contains_key("address"));
        assert!(!keys.contains_key("city"));
        assert!(!keys.contains_key("state"));
        assert!(!keys.contains_key("postalCode"));
    }

    #[test]
    fn oversized_jpeg_is_rejected_before_any_state_change() {
        let mut form = editable_with(valid_draft());
        form.draft_mut().unwrap().image = None;

        let effects = form.upload(UploadEvent::Done(UploadFile {
            mime: "image/jpeg".to_owned(),
            bytes: vec![0; 2 * 1024 * 1024],
        }));

        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            Effect::Notify(Notification::Error(_)),
        ));
        assert_eq!(form.draft_mut().unwrap().image, None);
    }

    #[test]
    fn small_png_is_accepted_and_sets_the_image() {
        let mut form = editable_with(valid_draft());
        form.draft_mut().unwrap().image = None;

        assert!(form.upload(UploadEvent::Started).is_empty());
        let effects = form.upload(UploadEvent::Done(UploadFile {
            mime: "image/png".to_owned(),
            bytes: vec![0; 500 * 1024],
        }));

        assert!(effects.is_empty());
        let image = form.draft_mut().unwrap().image.clone().unwrap();
        assert!(image.starts_with("data:image/png;base64,"));
        assert!(matches!(
            form.view(),
            View::Form {
                uploading: false,
                ..
            },
        ));
    }

    #[test]
    fn rejected_upload_clears_the_inflight_indicator() {
        let mut form = editable_with(valid_draft());
        form.draft_mut().unwrap().image = None;

        drop(form.upload(UploadEvent::Started));
        let effects = form.upload(UploadEvent::Done(UploadFile {
            mime: "image/gif".to_owned(),
            bytes: vec![0; 1024],
        }));

        assert!(matches!(
            &effects[0],
            Effect::Notify(Notification::Error(_)),
        ));
        assert_eq!(form.draft_mut().unwrap().image, None);
        assert!(matches!(
            form.view(),
            View::Form {
                uploading: false,
                ..
            },
        ));
    }

    #[test]
    fn incomplete_draft_notifies_once_and_stays_editable() {
        let mut form = HostForm::mount(&session(true));

        let effects = form.submit();

        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            Effect::Notify(Notification::Error(_)),
        ));
        assert!(matches!(form.view(), View::Form { .. }));
    }

    #[test]
    fn fractional_cent_price_is_invalid() {
        let mut draft = valid_draft();
        draft.price = Some("119.995".parse().unwrap());
        let mut form = editable_with(draft);

        let effects = form.submit();

        assert!(matches!(&effects[0], Effect::Notify(_)));
    }

    #[test]
    fn success_redirects_to_the_created_listing() {
        let mut form = editable_with(valid_draft());
        drop(form.submit());

        let effects = form.finished(Ok("l1".to_owned()));

        assert!(effects.is_empty());
        assert_eq!(
            form.view(),
            View::Redirect(Route::Listing {
                id: "l1".to_owned(),
            }),
        );
    }

    #[test]
    fn failure_notifies_and_restores_the_form() {
        let mut form = editable_with(valid_draft());
        drop(form.submit());

        let effects = form.finished(Err(RequestError {
            message: "boom".to_owned(),
        }));

        assert!(matches!(
            &effects[0],
            Effect::Notify(Notification::Error(_)),
        ));
        let draft = form.draft_mut().unwrap();
        assert_eq!(draft.title, "Beverly Hills mansion");
    }

    #[test]
    fn submitting_again_while_in_flight_does_nothing() {
        let mut form = editable_with(valid_draft());
        drop(form.submit());

        assert!(form.submit().is_empty());
    }
}
