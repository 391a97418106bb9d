pub mod make_trigger;
