use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use crate::catalog::SpaceCatalog;
use crate::error::BookingError;
use crate::ledger::BookingLedger;
use crate::model::{Reservation, ReservationId, SpaceId};
use crate::prompt;

/// Interactive menu shell over one catalog and one ledger, generic over
/// its streams so whole conversations can be scripted in tests.
pub struct Session<R, W> {
    input: R,
    out: W,
    catalog: SpaceCatalog,
    ledger: BookingLedger,
}

/// Render a reservation line, joining the space category through the
/// catalog at read time. A reservation whose space is gone falls back to
/// the bare form.
fn describe(catalog: &SpaceCatalog, res: &Reservation) -> String {
    match catalog.get(res.space_id) {
        Some(space) => format!(
            "Reservation ID: {}, Customer: {}, Space ID: {} ({}), Date: {}, Time: {} - {}",
            res.id,
            res.customer,
            res.space_id,
            space.category,
            res.slot.date,
            res.slot.start.format("%H:%M"),
            res.slot.end.format("%H:%M"),
        ),
        None => res.to_string(),
    }
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, catalog: SpaceCatalog, ledger: BookingLedger) -> Self {
        Self {
            input,
            out,
            catalog,
            ledger,
        }
    }

    /// Hand the streams and components back, for inspection after a
    /// scripted run.
    pub fn into_parts(self) -> (R, W, SpaceCatalog, BookingLedger) {
        (self.input, self.out, self.catalog, self.ledger)
    }

    /// Run until the user exits. A closed input stream ends the session
    /// cleanly rather than erroring out.
    pub fn run(&mut self) -> io::Result<()> {
        match self.main_menu() {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(()),
            other => other,
        }
    }

    // ── menu loops ───────────────────────────────────────────

    fn main_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=============================================")?;
        writeln!(self.out, " Welcome to the Coworking Space Reservation App!")?;
        writeln!(self.out, "=============================================")?;

        loop {
            writeln!(self.out, "\n--- Main Menu ---")?;
            writeln!(self.out, "1. Admin Login")?;
            writeln!(self.out, "2. Customer Login")?;
            writeln!(self.out, "3. Exit")?;
            match prompt::read_u32(&mut self.input, &mut self.out, "Enter your choice: ")? {
                1 => self.admin_menu()?,
                2 => self.customer_login()?,
                3 => {
                    writeln!(self.out, "\nThank you for using the app. Exiting...")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn admin_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n--- Admin Access Granted ---")?;
        loop {
            writeln!(self.out, "\n--- Admin Menu ---")?;
            writeln!(self.out, "1. Add New Coworking Space")?;
            writeln!(self.out, "2. Remove Coworking Space")?;
            writeln!(self.out, "3. Update Coworking Space")?;
            writeln!(self.out, "4. View All Coworking Spaces")?;
            writeln!(self.out, "5. View All Reservations")?;
            writeln!(self.out, "6. Logout (Back to Main Menu)")?;
            match prompt::read_u32(&mut self.input, &mut self.out, "Enter your choice: ")? {
                1 => self.add_space()?,
                2 => self.remove_space()?,
                3 => self.update_space()?,
                4 => self.view_spaces()?,
                5 => self.view_reservations()?,
                6 => {
                    writeln!(self.out, "Logging out from Admin Menu...")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn customer_login(&mut self) -> io::Result<()> {
        let name = prompt::read_line(
            &mut self.input,
            &mut self.out,
            "Enter your name to login/register: ",
        )?;
        debug!("customer {name} logged in");
        writeln!(self.out, "\nWelcome, {name}!")?;

        loop {
            writeln!(self.out, "\n--- Customer Menu (Logged in as: {name}) ---")?;
            writeln!(self.out, "1. Browse Available Spaces for a Time Slot")?;
            writeln!(self.out, "2. Make a Reservation")?;
            writeln!(self.out, "3. View My Reservations")?;
            writeln!(self.out, "4. Cancel a Reservation")?;
            writeln!(self.out, "5. Logout (Back to Main Menu)")?;
            match prompt::read_u32(&mut self.input, &mut self.out, "Enter your choice: ")? {
                1 => self.browse_available()?,
                2 => self.make_reservation(&name)?,
                3 => self.view_my_reservations(&name)?,
                4 => self.cancel_reservation(&name)?,
                5 => {
                    writeln!(self.out, "Logging out...")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
    }

    // ── admin actions ────────────────────────────────────────

    fn add_space(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n--- Add New Coworking Space ---")?;
        let category = prompt::read_line(
            &mut self.input,
            &mut self.out,
            "Enter space category (e.g., Open Desk, Private Office): ",
        )?;
        let rate = prompt::read_rate(&mut self.input, &mut self.out, "Enter rate per hour: $")?;

        match self.catalog.add(category, rate) {
            Ok(space) => {
                info!("space {} added", space.id);
                writeln!(self.out, "Space added successfully: {space}")?;
            }
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(())
    }

    fn remove_space(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n--- Remove Coworking Space ---")?;
        self.view_spaces()?;
        let id = prompt::read_u32(
            &mut self.input,
            &mut self.out,
            "Enter the ID of the space to remove: ",
        )?;

        // Dependent reservations are previewed and explicitly confirmed
        // before anything is deleted.
        let dependents = self.ledger.list_by_space(id);
        if !dependents.is_empty() {
            writeln!(self.out, "Warning: This space has existing reservations:")?;
            for res in &dependents {
                writeln!(self.out, "{}", describe(&self.catalog, res))?;
            }
            if !prompt::confirm(
                &mut self.input,
                &mut self.out,
                "Are you sure you want to remove this space and its reservations? (yes/no): ",
            )? {
                writeln!(self.out, "Removal cancelled.")?;
                return Ok(());
            }
            let removed = self.ledger.cascade_remove(id);
            info!("{} reservations cancelled with space {id}", removed.len());
            writeln!(self.out, "Associated reservations cancelled.")?;
        }

        if self.catalog.remove(id) {
            info!("space {id} removed");
            writeln!(self.out, "Space with ID {id} removed successfully.")?;
        } else {
            writeln!(self.out, "Error: Space with ID {id} not found.")?;
        }
        Ok(())
    }

    fn update_space(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n--- Update Coworking Space ---")?;
        self.view_spaces()?;
        let id = prompt::read_u32(
            &mut self.input,
            &mut self.out,
            "Enter the ID of the space to update: ",
        )?;

        let Some(space) = self.catalog.get(id) else {
            writeln!(self.out, "Error: Space with ID {id} not found.")?;
            return Ok(());
        };
        writeln!(self.out, "Current details: {space}")?;
        let current_category = space.category.clone();
        let current_rate = space.hourly_rate;
        let current_flag = space.available;

        // Blank input keeps the current value for every field.
        let category_input = prompt::read_line(
            &mut self.input,
            &mut self.out,
            &format!("Enter new category (leave blank to keep '{current_category}'): "),
        )?;
        if !category_input.trim().is_empty()
            && let Err(e) = self.catalog.set_category(id, category_input)
        {
            writeln!(self.out, "Error: {e}")?;
            return Ok(());
        }

        let rate_input = prompt::read_line(
            &mut self.input,
            &mut self.out,
            &format!(
                "Enter new rate per hour (leave blank or enter invalid number to keep ${current_rate:.2}): $"
            ),
        )?;
        let rate_input = rate_input.trim();
        if !rate_input.is_empty() {
            match rate_input.parse::<f64>() {
                Ok(rate) if rate < 0.0 => {
                    writeln!(self.out, "Rate cannot be negative. Keeping original rate.")?;
                }
                Ok(rate) => {
                    if self.catalog.set_rate(id, rate).is_err() {
                        writeln!(self.out, "Invalid rate format. Keeping original rate.")?;
                    }
                }
                Err(_) => writeln!(self.out, "Invalid rate format. Keeping original rate.")?,
            }
        }

        let flag_input = prompt::read_line(
            &mut self.input,
            &mut self.out,
            &format!("Set availability (true/false, leave blank to keep '{current_flag}'): "),
        )?;
        let flag_input = flag_input.trim();
        let new_flag = if flag_input.eq_ignore_ascii_case("true") {
            Some(true)
        } else if flag_input.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        };
        if let Some(value) = new_flag
            && let Err(e) = self.catalog.set_available(id, value)
        {
            writeln!(self.out, "Error: {e}")?;
            return Ok(());
        }

        if let Some(space) = self.catalog.get(id) {
            info!("space {id} updated");
            writeln!(self.out, "Space updated successfully: {space}")?;
        }
        Ok(())
    }

    fn view_spaces(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n--- All Coworking Spaces ---")?;
        if self.catalog.list().is_empty() {
            writeln!(self.out, "No coworking spaces found.")?;
        } else {
            for space in self.catalog.list() {
                writeln!(self.out, "{space}")?;
            }
        }
        writeln!(self.out, "-----------------------------")?;
        Ok(())
    }

    fn view_reservations(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n--- All Reservations ---")?;
        if self.ledger.list().is_empty() {
            writeln!(self.out, "No reservations found.")?;
        } else {
            for res in self.ledger.list() {
                writeln!(self.out, "{}", describe(&self.catalog, res))?;
            }
        }
        writeln!(self.out, "-------------------------")?;
        Ok(())
    }

    // ── customer actions ─────────────────────────────────────

    /// Date and window prompts shared by the browse and booking flows.
    /// Returns `None` when the window is rejected before touching the
    /// core.
    fn read_window(
        &mut self,
        date_prompt: &str,
    ) -> io::Result<Option<(NaiveDate, NaiveTime, NaiveTime)>> {
        let date = prompt::read_date(&mut self.input, &mut self.out, date_prompt)?;
        let start = prompt::read_time(
            &mut self.input,
            &mut self.out,
            "Enter desired start time (HH:MM): ",
        )?;
        let end = prompt::read_time(
            &mut self.input,
            &mut self.out,
            "Enter desired end time (HH:MM): ",
        )?;
        if end <= start {
            writeln!(self.out, "Error: End time must be after start time.")?;
            return Ok(None);
        }
        Ok(Some((date, start, end)))
    }

    fn browse_available(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n--- Browse Available Spaces ---")?;
        let Some((date, start, end)) = self.read_window("Enter desired date (YYYY-MM-DD): ")?
        else {
            return Ok(());
        };

        writeln!(
            self.out,
            "\n--- Available Spaces for {date} from {} to {} ---",
            start.format("%H:%M"),
            end.format("%H:%M"),
        )?;
        match self.ledger.available_spaces(&self.catalog, date, start, end) {
            Ok(free) if free.is_empty() => {
                writeln!(self.out, "No spaces available for the selected time slot.")?;
            }
            Ok(free) => {
                for space in free {
                    writeln!(self.out, "{space}")?;
                }
            }
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        writeln!(self.out, "-----------------------------------------------------")?;
        Ok(())
    }

    fn make_reservation(&mut self, customer: &str) -> io::Result<()> {
        writeln!(self.out, "\n--- Make a Reservation ---")?;
        let Some((date, start, end)) =
            self.read_window("Enter desired reservation date (YYYY-MM-DD): ")?
        else {
            return Ok(());
        };

        writeln!(
            self.out,
            "\n--- Checking Availability for {date} from {} to {} ---",
            start.format("%H:%M"),
            end.format("%H:%M"),
        )?;
        let free_ids: Vec<SpaceId> =
            match self.ledger.available_spaces(&self.catalog, date, start, end) {
                Ok(free) if free.is_empty() => {
                    writeln!(self.out, "Sorry, no spaces are available for this time slot.")?;
                    return Ok(());
                }
                Ok(free) => {
                    writeln!(self.out, "Available Spaces:")?;
                    for space in &free {
                        writeln!(self.out, "{space}")?;
                    }
                    writeln!(self.out, "--------------------")?;
                    free.iter().map(|s| s.id).collect()
                }
                Err(e) => {
                    writeln!(self.out, "Error: {e}")?;
                    return Ok(());
                }
            };

        let space_id = prompt::read_u32(
            &mut self.input,
            &mut self.out,
            "Enter the ID of the space you want to reserve: ",
        )?;
        // Only ids from the list just shown are accepted; the ledger
        // re-checks everything at commit anyway.
        if !free_ids.contains(&space_id) {
            writeln!(
                self.out,
                "Error: The selected Space ID ({space_id}) is not available for the chosen time slot or does not exist.",
            )?;
            return Ok(());
        }

        match self
            .ledger
            .book(&self.catalog, customer, space_id, date, start, end)
        {
            Ok(res) => {
                info!("reservation {} booked on space {space_id}", res.id);
                writeln!(self.out, "Reservation successful!")?;
                writeln!(self.out, "{}", describe(&self.catalog, &res))?;
            }
            Err(BookingError::Conflict(existing)) => {
                writeln!(
                    self.out,
                    "Error: Space ID {space_id} is already booked during the requested time.",
                )?;
                writeln!(
                    self.out,
                    "   Existing booking: {} from {} to {}",
                    existing.slot.date,
                    existing.slot.start.format("%H:%M"),
                    existing.slot.end.format("%H:%M"),
                )?;
            }
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(())
    }

    fn view_my_reservations(&mut self, customer: &str) -> io::Result<()> {
        writeln!(self.out, "\n--- Your Reservations ({customer}) ---")?;
        let mine = self.ledger.list_by_customer(customer);
        if mine.is_empty() {
            writeln!(self.out, "You have no reservations.")?;
        } else {
            for res in mine {
                writeln!(self.out, "{}", describe(&self.catalog, res))?;
            }
        }
        writeln!(self.out, "-------------------------------------")?;
        Ok(())
    }

    fn cancel_reservation(&mut self, customer: &str) -> io::Result<()> {
        writeln!(self.out, "\n--- Cancel a Reservation ---")?;
        let mine = self.ledger.list_by_customer(customer);
        if mine.is_empty() {
            writeln!(self.out, "You have no reservations to cancel.")?;
            return Ok(());
        }
        writeln!(self.out, "Your current reservations:")?;
        for res in &mine {
            writeln!(self.out, "{}", describe(&self.catalog, res))?;
        }
        writeln!(self.out, "--------------------------")?;
        let owned: Vec<ReservationId> = mine.iter().map(|r| r.id).collect();

        let id = prompt::read_u32(
            &mut self.input,
            &mut self.out,
            "Enter the Reservation ID you want to cancel: ",
        )?;
        // Customers may only cancel their own bookings.
        if !owned.contains(&id) {
            writeln!(
                self.out,
                "Error: Reservation ID {id} not found in your bookings.",
            )?;
            return Ok(());
        }

        if self.ledger.cancel(id) {
            info!("reservation {id} cancelled");
            writeln!(self.out, "Reservation ID {id} cancelled successfully.")?;
        } else {
            writeln!(
                self.out,
                "Error: Could not cancel reservation ID {id}. It might have already been cancelled or does not exist.",
            )?;
        }
        Ok(())
    }
}
