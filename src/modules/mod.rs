pub mod installments;
