mod boolean;
mod closure;
mod mutation;
mod range;

pub(crate) use boolean::validate_boolean_operation;
pub(crate) use closure::validate_closure_step;
pub(crate) use mutation::{
	validate_update_step, validate_upsert_e_step, validate_upsert_n_step, validate_upsert_step,
	validate_upsert_v_step,
};
pub(crate) use range::{validate_order_by_step, validate_range_step};
