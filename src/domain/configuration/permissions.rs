//! Model and field permission checks.
//!
//! A superuser passes every check. Otherwise access is granted when the
//! principal is listed directly or through one of its groups. Fields with
//! `inherit_permissions` defer to the owning model.

use crate::domain::configuration::field::FieldConfiguration;
use crate::domain::configuration::grants::Access;
use crate::domain::configuration::model::ModelConfiguration;
use crate::domain::user::Principal;

pub fn can_access_model(principal: &Principal, model: &ModelConfiguration, access: Access) -> bool {
    if principal.is_superuser {
        return true;
    }
    match access {
        Access::Read => model.read_permission.admits(principal),
        Access::Write => model.write_permission.admits(principal),
    }
}

pub fn can_access_field(
    principal: &Principal,
    field: &FieldConfiguration,
    model: &ModelConfiguration,
    access: Access,
) -> bool {
    if field.inherit_permissions {
        return can_access_model(principal, model, access);
    }
    if principal.is_superuser {
        return true;
    }
    match access {
        Access::Read => field.read_permission.admits(principal),
        Access::Write => field.write_permission.admits(principal),
    }
}

pub fn can_read_model(principal: &Principal, model: &ModelConfiguration) -> bool {
    can_access_model(principal, model, Access::Read)
}

pub fn can_write_model(principal: &Principal, model: &ModelConfiguration) -> bool {
    can_access_model(principal, model, Access::Write)
}

pub fn can_read_field(
    principal: &Principal,
    field: &FieldConfiguration,
    model: &ModelConfiguration,
) -> bool {
    can_access_field(principal, field, model, Access::Read)
}

pub fn can_write_field(
    principal: &Principal,
    field: &FieldConfiguration,
    model: &ModelConfiguration,
) -> bool {
    can_access_field(principal, field, model, Access::Write)
}
