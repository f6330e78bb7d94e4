// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rating submission.

use tracing::info;

use crate::datastore::Datastore;
use crate::error::{ApiError, map_persistence_error};
use crate::request_response::RatingResponse;
use crate::validation::validate_rating;

/// Rating service: one overwritable rating text per user.
pub struct RatingService;

impl RatingService {
    /// Validates and stores a rating for the authenticated user.
    ///
    /// Blank text is rejected before any database access; a valid submission
    /// overwrites whatever rating the user had.
    ///
    /// # Arguments
    ///
    /// * `datastore` - The storage backend
    /// * `user_id` - The authenticated user's ID
    /// * `penilaian` - The submitted rating text
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the text is blank, or `Internal` if the
    /// update fails.
    pub fn submit_rating(
        datastore: &mut dyn Datastore,
        user_id: i64,
        penilaian: Option<&str>,
    ) -> Result<RatingResponse, ApiError> {
        let text: String = validate_rating(penilaian)?;

        datastore.update_rating(user_id, &text).map_err(|err| {
            map_persistence_error("Failed to store rating", "Gagal menyimpan penilaian.", &err)
        })?;

        info!(user_id, "Rating stored");
        Ok(RatingResponse {
            message: String::from("Terima kasih, penilaian Anda telah kami simpan!"),
        })
    }
}
