pub mod build_ddg;

pub use build_ddg::BuildDDGUseCase;
