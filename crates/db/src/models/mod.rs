pub mod dinosaur;
