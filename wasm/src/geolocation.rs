//! `navigator.geolocation` as a [`Geolocator`]

use js_sys::{Function, Promise, Reflect};
use shared::{GeolocationError, Geolocator, GpsCoordinates};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::PositionOptions;

pub struct BrowserGeolocator;

impl Geolocator for BrowserGeolocator {
    async fn current_position(
        &self,
        timeout: Duration,
    ) -> Result<GpsCoordinates, GeolocationError> {
        let geolocation = web_sys::window()
            .ok_or(GeolocationError::Unsupported)?
            .navigator()
            .geolocation()
            .map_err(|_| GeolocationError::Unsupported)?;

        let options = PositionOptions::new();
        options.set_timeout(u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX));

        let promise = Promise::new(&mut |resolve: Function, reject: Function| {
            let on_error = reject.clone();
            let on_success = Closure::once_into_js(move |position: JsValue| {
                let _ = resolve.call1(&JsValue::NULL, &position);
            });
            let on_failure = Closure::once_into_js(move |error: JsValue| {
                let _ = on_error.call1(&JsValue::NULL, &error);
            });

            if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
                on_success.unchecked_ref(),
                Some(on_failure.unchecked_ref()),
                &options,
            ) {
                let _ = reject.call1(&JsValue::NULL, &e);
            }
        });

        let position = JsFuture::from(promise)
            .await
            .map_err(|error| error_from_js(&error))?;
        coordinates_from_js(&position).ok_or(GeolocationError::PositionUnavailable)
    }
}

fn number_field(object: &JsValue, name: &str) -> Option<f64> {
    Reflect::get(object, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.as_f64())
}

fn coordinates_from_js(position: &JsValue) -> Option<GpsCoordinates> {
    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    Some(GpsCoordinates::new(
        number_field(&coords, "latitude")?,
        number_field(&coords, "longitude")?,
    ))
}

fn error_from_js(error: &JsValue) -> GeolocationError {
    number_field(error, "code")
        .map(|code| GeolocationError::from_code(code as u16))
        .unwrap_or(GeolocationError::PositionUnavailable)
}
