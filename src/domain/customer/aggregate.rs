use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use crate::domain::normalize_text;
use crate::event_sourcing::Aggregate;
use super::value_objects::{MeasurementSet, NewCustomer, NewMeasurementSet};
use super::commands::CustomerCommand;
use super::events::*;
use super::errors::CustomerError;

// ============================================================================
// Customer Aggregate - Business Logic
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub measurement_sets: Vec<MeasurementSet>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Validate a registration and produce the first event
    pub fn register(new_customer: NewCustomer) -> Result<CustomerRegistered, CustomerError> {
        let name = new_customer.name.trim();
        if name.is_empty() {
            return Err(CustomerError::EmptyName);
        }

        let registered_at = Utc::now();
        let measurement_sets = new_customer
            .measurement_sets
            .into_iter()
            .map(|set| Self::take_measurements(set, registered_at))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CustomerRegistered {
            customer_id: Uuid::new_v4(),
            name: name.to_string(),
            phone: normalize_text(new_customer.phone),
            email: normalize_text(new_customer.email),
            address: normalize_text(new_customer.address),
            photo: new_customer.photo,
            measurement_sets,
            registered_at,
        })
    }

    pub fn measurement_set(&self, set_id: Uuid) -> Option<&MeasurementSet> {
        self.measurement_sets.iter().find(|s| s.id == set_id)
    }

    fn take_measurements(
        set: NewMeasurementSet,
        taken_at: DateTime<Utc>,
    ) -> Result<MeasurementSet, CustomerError> {
        let name = set.name.trim();
        if name.is_empty() {
            return Err(CustomerError::EmptyMeasurementSetName);
        }

        Ok(MeasurementSet {
            id: Uuid::new_v4(),
            name: name.to_string(),
            garment_type: set.garment_type,
            values: set.values,
            notes: normalize_text(set.notes),
            reference_images: set.reference_images,
            created_at: taken_at,
        })
    }
}

impl Aggregate for Customer {
    type Event = CustomerEvent;
    type Command = CustomerCommand;
    type Error = CustomerError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            CustomerEvent::Registered(e) => Ok(Self {
                id: e.customer_id,
                name: e.name.clone(),
                phone: e.phone.clone(),
                email: e.email.clone(),
                address: e.address.clone(),
                photo: e.photo.clone(),
                measurement_sets: e.measurement_sets.clone(),
                created_at: e.registered_at,
            }),
            _ => Err(CustomerError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            CustomerEvent::Registered(_) => {
                // Already applied in apply_first_event
            }
            CustomerEvent::ProfileUpdated(e) => {
                if let Some(ref name) = e.name {
                    self.name = name.clone();
                }
                if let Some(ref phone) = e.phone {
                    self.phone = phone.clone();
                }
                if let Some(ref email) = e.email {
                    self.email = email.clone();
                }
                if let Some(ref address) = e.address {
                    self.address = address.clone();
                }
                if let Some(ref photo) = e.photo {
                    self.photo = photo.clone();
                }
            }
            CustomerEvent::MeasurementSetAdded(e) => {
                self.measurement_sets.push(e.set.clone());
            }
        }

        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CustomerCommand::UpdateProfile(patch) => {
                let name = match &patch.name {
                    Some(name) if name.trim().is_empty() => return Err(CustomerError::EmptyName),
                    Some(name) => Some(name.trim().to_string()),
                    None => None,
                };

                Ok(vec![CustomerEvent::ProfileUpdated(CustomerProfileUpdated {
                    name,
                    phone: patch.phone.clone().map(|v| normalize_text(Some(v))),
                    email: patch.email.clone().map(|v| normalize_text(Some(v))),
                    address: patch.address.clone().map(|v| normalize_text(Some(v))),
                    photo: patch.photo.clone().map(|v| normalize_text(Some(v))),
                })])
            }

            CustomerCommand::AddMeasurementSet(set) => {
                let set = Self::take_measurements(set.clone(), Utc::now())?;
                Ok(vec![CustomerEvent::MeasurementSetAdded(MeasurementSetAdded { set })])
            }
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.id
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
